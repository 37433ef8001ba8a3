//! Registry of (month, force) combinations with published stop-and-search data.
//!
//! Built once from a single upstream request and never refreshed. A non-200
//! answer leaves the registry `Unknown`, which is distinct from a listing
//! that happens to be empty: validity cannot be checked at all.

mod parse;

pub use parse::{literal_to_list, AvailabilityRow, ForceList};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::fetch::{Endpoints, FetchError, HttpFetcher};
use crate::sink::TableSink;
use crate::table::Table;

/// Category of data a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    StopAndSearch,
}

impl DataKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DataKind::StopAndSearch => "stop_and_search",
        }
    }
}

/// One (month, force) pair the upstream reports as available.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvailabilityRecord {
    /// Month token, `YYYY-MM`.
    pub date: String,
    pub force: String,
    pub kind: DataKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Populated(Vec<AvailabilityRecord>),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRegistry {
    state: State,
}

impl AvailabilityRegistry {
    /// Fetch the availability listing once.
    ///
    /// Any non-200 status yields an `Unknown` registry. Transport failures and
    /// undecodable 200 bodies are returned as errors.
    pub fn fetch<F: HttpFetcher + ?Sized>(
        fetcher: &F,
        endpoints: &Endpoints,
    ) -> Result<Self, FetchError> {
        let url = endpoints.availability();
        let response = fetcher.get(url)?;
        if !response.is_ok() {
            tracing::warn!(
                status = response.status,
                "no availability data from {}; forces and dates cannot be checked \
                 and requests may be sent for combinations that do not exist",
                url
            );
            return Ok(Self::unknown());
        }
        let rows: Vec<AvailabilityRow> = response.json(url)?;
        let registry = Self::from_rows(rows);
        tracing::info!(
            records = registry.records().len(),
            forces = registry.forces().len(),
            dates = registry.dates().len(),
            "availability loaded from {}",
            url
        );
        Ok(registry)
    }

    /// Parse a raw availability payload (JSON list of rows).
    pub fn from_payload(payload: &[u8]) -> Result<Self, serde_json::Error> {
        let rows: Vec<AvailabilityRow> = serde_json::from_slice(payload)?;
        Ok(Self::from_rows(rows))
    }

    pub fn from_rows(rows: Vec<AvailabilityRow>) -> Self {
        Self::from_records(parse::explode(rows))
    }

    pub fn from_records(records: Vec<AvailabilityRecord>) -> Self {
        Self {
            state: State::Populated(records),
        }
    }

    /// Registry whose contents could not be determined.
    pub fn unknown() -> Self {
        Self {
            state: State::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.state, State::Unknown)
    }

    /// All records; empty when unknown.
    pub fn records(&self) -> &[AvailabilityRecord] {
        match &self.state {
            State::Populated(records) => records,
            State::Unknown => &[],
        }
    }

    /// Distinct forces in first-seen order.
    pub fn forces(&self) -> Vec<String> {
        distinct(self.records().iter().map(|r| r.force.as_str()))
    }

    /// Distinct dates in first-seen order.
    pub fn dates(&self) -> Vec<String> {
        distinct(self.records().iter().map(|r| r.date.as_str()))
    }

    pub fn contains_force(&self, force: &str) -> bool {
        self.records().iter().any(|r| r.force == force)
    }

    pub fn contains_date(&self, date: &str) -> bool {
        self.records().iter().any(|r| r.date == date)
    }

    /// Normalized table with `force`, `date` and `type` columns.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(vec!["force".into(), "date".into(), "type".into()]);
        for r in self.records() {
            table.push_row(vec![
                r.force.clone(),
                r.date.clone(),
                r.kind.as_str().to_string(),
            ]);
        }
        table
    }

    /// Write the normalized table to `path` and return the path written.
    ///
    /// A path whose file name is empty or blank is redirected to
    /// `available.<ext>` in the same directory.
    pub fn export(&self, path: &Path, sink: &dyn TableSink) -> Result<PathBuf> {
        if self.is_unknown() {
            anyhow::bail!("availability is unknown; nothing to export");
        }
        let blank_name = path
            .file_name()
            .map(|n| n.to_string_lossy().trim().is_empty())
            .unwrap_or(true);
        let target = if blank_name {
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let replaced = dir.join(format!("available.{}", sink.extension()));
            tracing::info!(
                "export path had no file name; using {}",
                replaced.display()
            );
            replaced
        } else {
            path.to_path_buf()
        };
        sink.write(&self.to_table(), &target)
            .with_context(|| format!("export availability to {}", target.display()))?;
        Ok(target)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
