//! `stopsearch config` – show where the config lives and what is in effect.

use anyhow::Result;
use stopsearch_core::config::{self, StopSearchConfig};

pub fn run_show_config(cfg: &StopSearchConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
