//! `stopsearch available` – summarize availability, optionally export it.

use anyhow::Result;
use std::path::Path;
use stopsearch_core::availability::AvailabilityRegistry;
use stopsearch_core::config::StopSearchConfig;
use stopsearch_core::sink::{self, TableSink};

pub fn run_available(cfg: StopSearchConfig, export: Option<&Path>) -> Result<()> {
    let sink = sink::for_format(cfg.output_format);
    let client = super::connect(cfg)?;
    let registry = client.registry();
    if !registry.is_unknown() {
        print_summary(registry);
    }
    if let Some(path) = export {
        export_registry(registry, path, &sink)?;
    }
    Ok(())
}

fn print_summary(registry: &AvailabilityRegistry) {
    let dates = registry.dates();
    println!(
        "{} force/month combination(s) across {} force(s) and {} month(s)",
        registry.records().len(),
        registry.forces().len(),
        dates.len()
    );
    // Upstream lists months newest first.
    if let (Some(oldest), Some(newest)) = (dates.last(), dates.first()) {
        println!("Months {oldest} .. {newest}");
    }
}

fn export_registry(
    registry: &AvailabilityRegistry,
    path: &Path,
    sink: &dyn TableSink,
) -> Result<()> {
    let written = registry.export(path, sink)?;
    println!("Exported to {}", written.display());
    Ok(())
}
