//! `stopsearch plan <file>` – queue jobs from a JSON plan file and run them.
//!
//! A plan is one object or a list of objects, each with optional `dates` and
//! `forces`. Missing axes mean "every available value". Entries are queued in
//! file order, each as its own `add_job` call.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use stopsearch_core::config::StopSearchConfig;

use super::RunOptions;

pub fn run_plan(cfg: StopSearchConfig, path: &Path, opts: RunOptions) -> Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read plan {}", path.display()))?;
    let entries = parse_plan(&text).with_context(|| format!("parse plan {}", path.display()))?;

    let mut client = super::connect(cfg)?;
    for (i, entry) in entries.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            tracing::warn!("plan entry {} is not an object; skipped", i + 1);
            println!("Entry {} skipped: expected an object with dates/forces.", i + 1);
            continue;
        };
        let report = client.add_job_json(obj.get("dates"), obj.get("forces"));
        super::print_add_report(&report);
    }
    super::execute(&mut client, opts)
}

/// Plan entries in file order.
fn parse_plan(text: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(entries) => Ok(entries),
        single @ Value::Object(_) => Ok(vec![single]),
        other => anyhow::bail!("plan must be an object or a list of objects, got {}", other),
    }
}
