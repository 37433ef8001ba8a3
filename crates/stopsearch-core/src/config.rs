use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default pause between successive job fetches, in seconds.
pub const DEFAULT_DELAY_SECS: u64 = 1;
/// Default job batch size (advisory).
pub const DEFAULT_JOB_BATCH: u64 = 10;

/// Upstream API endpoints and HTTP timeouts (`[api]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listing of (month, forces) combinations with stop-and-search data.
    pub availability_url: String,
    /// Per-(force, month) records endpoint; `force` and `date` are appended as query parameters.
    pub stops_force_url: String,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            availability_url: "https://data.police.uk/api/crimes-street-dates".to_string(),
            stops_force_url: "https://data.police.uk/api/stops-force".to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

/// Output file format for downloaded tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
}

/// Global configuration loaded from `~/.config/stopsearch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopSearchConfig {
    /// Seconds to wait before each job fetch. Zero falls back to the default.
    pub delay_secs: u64,
    /// Jobs per batch. Reported but not used to split execution.
    pub job_batch: u64,
    /// Destination folder for downloaded files (None = current directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savefolder: Option<PathBuf>,
    /// Table format for downloaded and exported files.
    pub output_format: OutputFormat,
    pub api: ApiConfig,
}

impl Default for StopSearchConfig {
    fn default() -> Self {
        Self {
            delay_secs: DEFAULT_DELAY_SECS,
            job_batch: DEFAULT_JOB_BATCH,
            savefolder: None,
            output_format: OutputFormat::Csv,
            api: ApiConfig::default(),
        }
    }
}

impl StopSearchConfig {
    /// Replace non-positive numeric settings with their defaults.
    pub fn sanitized(mut self) -> Self {
        if self.delay_secs == 0 {
            tracing::warn!("delay_secs must be positive; using {}", DEFAULT_DELAY_SECS);
            self.delay_secs = DEFAULT_DELAY_SECS;
        }
        if self.job_batch == 0 {
            tracing::warn!("job_batch must be positive; using {}", DEFAULT_JOB_BATCH);
            self.job_batch = DEFAULT_JOB_BATCH;
        }
        let defaults = ApiConfig::default();
        if self.api.connect_timeout_secs == 0 {
            self.api.connect_timeout_secs = defaults.connect_timeout_secs;
        }
        if self.api.timeout_secs == 0 {
            self.api.timeout_secs = defaults.timeout_secs;
        }
        self
    }

    /// Destination folder, defaulting to the current directory.
    pub fn savefolder(&self) -> PathBuf {
        self.savefolder.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Coerce user input to a positive integer, or return `fallback`.
///
/// Integers are taken as-is, decimals are truncated (`"3.14"` → 3). Anything
/// unparseable or not positive after truncation yields `fallback`.
pub fn coerce_positive(raw: &str, fallback: u64) -> u64 {
    let raw = raw.trim();
    let parsed = raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    });
    match parsed {
        Some(n) if n > 0 => n as u64,
        _ => fallback,
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("stopsearch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<StopSearchConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<StopSearchConfig> {
    if !path.exists() {
        let default_cfg = StopSearchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: StopSearchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg.sanitized())
}
