//! `stopsearch download` – queue one cross-product of months and forces and run it.

use anyhow::Result;
use stopsearch_core::config::StopSearchConfig;
use stopsearch_core::jobs::Selection;

use super::RunOptions;

pub fn run_download(
    cfg: StopSearchConfig,
    dates: Option<Vec<String>>,
    forces: Option<Vec<String>>,
    opts: RunOptions,
) -> Result<()> {
    if dates.is_none() && forces.is_none() {
        println!("No dates or forces given; every available combination will be queued.");
    }
    let mut client = super::connect(cfg)?;
    let report = client.add_job(selection(dates), selection(forces));
    super::print_add_report(&report);
    super::execute(&mut client, opts)
}

fn selection(values: Option<Vec<String>>) -> Selection {
    values.map(Selection::only).unwrap_or_default()
}
