//! CLI command handlers. Each command is in its own file.

mod available;
mod download;
mod list;
mod plan;
mod show_config;

pub use available::run_available;
pub use download::run_download;
pub use list::{run_dates, run_forces};
pub use plan::run_plan;
pub use show_config::run_show_config;

use anyhow::{Context, Result};
use stopsearch_core::config::StopSearchConfig;
use stopsearch_core::fetch::CurlFetcher;
use stopsearch_core::jobs::{AddJobReport, AddOutcome, Job};
use stopsearch_core::session::StopSearchClient;
use stopsearch_core::sink;

/// Execution options resolved from flags and config.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub delay: Option<i64>,
    pub dry_run: bool,
}

/// Open a session: fetches availability once.
fn connect(cfg: StopSearchConfig) -> Result<StopSearchClient<CurlFetcher>> {
    let fetcher = CurlFetcher::from_config(&cfg.api);
    let client = StopSearchClient::connect(cfg, fetcher).context("fetch availability")?;
    if client.registry().is_unknown() {
        println!("Availability data cannot be checked; jobs will be flagged invalid.");
    }
    Ok(client)
}

fn print_add_report(report: &AddJobReport) {
    match &report.outcome {
        AddOutcome::Added => {
            println!("Job added");
            println!("Dates  {}", report.dates.join(", "));
            println!("Forces {}", report.forces.join(", "));
            println!("Request count: {}", report.added);
        }
        AddOutcome::Malformed(e) => println!("Job not added: {e}"),
        AddOutcome::AvailabilityUnknown => {
            println!("Job not added: availability is unknown, so no list can fill in missing dates/forces.")
        }
        AddOutcome::EmptyAfterFiltering => {
            println!("Job not added: input list is empty after filtering.")
        }
    }
    for (axis, rejected) in [("dates", &report.rejected_dates), ("forces", &report.rejected_forces)] {
        if !rejected.is_empty() {
            let shown: Vec<String> = rejected.iter().map(|v| v.to_string()).collect();
            println!("Dropped non-string {axis}: {}", shown.join(", "));
        }
    }
}

fn print_jobs(jobs: &[Job]) {
    if jobs.is_empty() {
        println!("No jobs queued.");
        return;
    }
    println!(
        "{:<10} {:<28} {:<10} {:<11} {}",
        "DATE", "FORCE", "VALID_DATE", "VALID_FORCE", "STATUS"
    );
    for j in jobs {
        println!(
            "{:<10} {:<28} {:<10} {:<11} {}",
            j.date,
            j.force,
            j.valid_date,
            j.valid_force,
            j.status.as_str()
        );
    }
}

/// Run (or just list, for a dry run) everything queued on `client`.
fn execute(client: &mut StopSearchClient<CurlFetcher>, opts: RunOptions) -> Result<()> {
    if opts.dry_run {
        print_jobs(client.jobs());
        return Ok(());
    }
    if client.jobs().is_empty() {
        println!("No jobs queued.");
        return Ok(());
    }
    let sink = sink::for_format(client.config().output_format);
    let report = client.execute(opts.delay, &sink)?;
    for path in &report.written {
        println!("{}", path.display());
    }
    for f in &report.failures {
        println!("{} {} failed: {}", f.date, f.force, f.error);
    }
    println!(
        "Downloaded {} of {} job(s).",
        report.written.len(),
        client.jobs().len()
    );
    if !report.failures.is_empty() {
        tracing::warn!("{} job(s) failed", report.failures.len());
    }
    Ok(())
}
