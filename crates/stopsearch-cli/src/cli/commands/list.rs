//! `stopsearch forces` / `stopsearch dates`.

use anyhow::Result;
use stopsearch_core::config::StopSearchConfig;

pub fn run_forces(cfg: StopSearchConfig) -> Result<()> {
    let client = super::connect(cfg)?;
    for force in client.forces() {
        println!("{force}");
    }
    Ok(())
}

pub fn run_dates(cfg: StopSearchConfig) -> Result<()> {
    let client = super::connect(cfg)?;
    for date in client.dates() {
        println!("{date}");
    }
    Ok(())
}
