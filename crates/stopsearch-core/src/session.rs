//! A download session: registry, queue and the serial executor.
//!
//! The registry is fetched once when the session is created. Jobs are then
//! added in any number of calls and drained by [`StopSearchClient::execute`],
//! one request per job with a fixed pause before each.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::availability::AvailabilityRegistry;
use crate::config::StopSearchConfig;
use crate::fetch::{Endpoints, FetchError, HttpFetcher};
use crate::jobs::{AddJobReport, Job, JobQueue, JobStatus, Selection};
use crate::pacing::{Pacer, ThreadPacer};
use crate::sink::TableSink;
use crate::table::Table;

/// One job that could not be fetched or written.
#[derive(Debug, Clone)]
pub struct JobFailure {
    pub date: String,
    pub force: String,
    pub error: String,
}

/// Result of draining the queue.
#[derive(Debug, Clone, Default)]
pub struct ExecuteReport {
    /// Files written, in job order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<JobFailure>,
    /// Jobs skipped because an earlier run already completed them.
    pub skipped: usize,
}

pub struct StopSearchClient<F: HttpFetcher> {
    config: StopSearchConfig,
    endpoints: Endpoints,
    fetcher: F,
    pacer: Box<dyn Pacer>,
    registry: AvailabilityRegistry,
    queue: JobQueue,
}

impl<F: HttpFetcher> StopSearchClient<F> {
    /// Create a session and fetch availability once.
    pub fn connect(config: StopSearchConfig, fetcher: F) -> Result<Self, FetchError> {
        let endpoints = Endpoints::from_config(&config.api)?;
        let registry = AvailabilityRegistry::fetch(&fetcher, &endpoints)?;
        Ok(Self::with_registry(config, endpoints, fetcher, registry))
    }

    /// Create a session around an already-built registry.
    pub fn with_registry(
        config: StopSearchConfig,
        endpoints: Endpoints,
        fetcher: F,
        registry: AvailabilityRegistry,
    ) -> Self {
        Self {
            config: config.sanitized(),
            endpoints,
            fetcher,
            pacer: Box::new(ThreadPacer),
            registry,
            queue: JobQueue::new(),
        }
    }

    /// Replace the pacer (tests use one that records instead of sleeping).
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    pub fn config(&self) -> &StopSearchConfig {
        &self.config
    }

    pub fn registry(&self) -> &AvailabilityRegistry {
        &self.registry
    }

    pub fn jobs(&self) -> &[Job] {
        self.queue.jobs()
    }

    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    pub fn forces(&self) -> Vec<String> {
        self.registry.forces()
    }

    pub fn dates(&self) -> Vec<String> {
        self.registry.dates()
    }

    pub fn add_job(&mut self, dates: Selection, forces: Selection) -> AddJobReport {
        self.queue.add_job(&self.registry, dates, forces)
    }

    pub fn add_job_json(&mut self, dates: Option<&Value>, forces: Option<&Value>) -> AddJobReport {
        self.queue.add_job_json(&self.registry, dates, forces)
    }

    /// Effective pause in seconds: `delay` when positive, else the configured default.
    pub fn resolve_delay(&self, delay: Option<i64>) -> u64 {
        match delay {
            Some(d) if d > 0 => d as u64,
            _ => self.config.delay_secs,
        }
    }

    /// Fetch and persist every queued job in order.
    ///
    /// Validity flags are not consulted: invalid pairs are requested too and
    /// the upstream decides. A failing job is marked `Error` and the batch
    /// continues. Jobs already `Done` are skipped.
    pub fn execute(&mut self, delay: Option<i64>, sink: &dyn TableSink) -> Result<ExecuteReport> {
        let delay = Duration::from_secs(self.resolve_delay(delay));
        let savefolder = self.config.savefolder();
        if !savefolder.exists() {
            fs::create_dir_all(&savefolder)
                .with_context(|| format!("create folder {}", savefolder.display()))?;
            tracing::info!("created folder {}", savefolder.display());
        }

        let total = self.queue.len();
        tracing::info!(
            jobs = total,
            delay_secs = delay.as_secs(),
            job_batch = self.config.job_batch,
            "starting download"
        );

        let mut report = ExecuteReport::default();
        let Self {
            endpoints,
            fetcher,
            pacer,
            queue,
            ..
        } = self;
        for (i, job) in queue.jobs_mut().iter_mut().enumerate() {
            if job.status == JobStatus::Done {
                report.skipped += 1;
                continue;
            }
            if !job.has_safe_file_name() {
                job.status = JobStatus::Error;
                tracing::warn!(
                    "[{}/{}] {} {} rejected: not usable as a file name",
                    i + 1,
                    total,
                    job.date,
                    job.force
                );
                report.failures.push(JobFailure {
                    date: job.date.clone(),
                    force: job.force.clone(),
                    error: "date or force is not usable as a file name".to_string(),
                });
                continue;
            }
            pacer.pause(delay);
            match fetch_and_save(&*fetcher, endpoints, job, &savefolder, sink) {
                Ok(path) => {
                    job.status = JobStatus::Done;
                    tracing::info!(
                        "[{}/{}] {} {} -> {}",
                        i + 1,
                        total,
                        job.date,
                        job.force,
                        path.display()
                    );
                    report.written.push(path);
                }
                Err(e) => {
                    job.status = JobStatus::Error;
                    tracing::warn!(
                        "[{}/{}] {} {} failed: {:#}",
                        i + 1,
                        total,
                        job.date,
                        job.force,
                        e
                    );
                    report.failures.push(JobFailure {
                        date: job.date.clone(),
                        force: job.force.clone(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        tracing::info!(
            written = report.written.len(),
            failed = report.failures.len(),
            skipped = report.skipped,
            "download finished"
        );
        Ok(report)
    }
}

/// Fetch one (force, month) listing and write it to `{date}_{force}.{ext}`.
fn fetch_and_save<F: HttpFetcher + ?Sized>(
    fetcher: &F,
    endpoints: &Endpoints,
    job: &Job,
    savefolder: &Path,
    sink: &dyn TableSink,
) -> Result<PathBuf> {
    let table = fetch_stops(fetcher, endpoints, &job.force, &job.date)?;
    let path = savefolder.join(job.file_name(sink.extension()));
    sink.write(&table, &path)?;
    Ok(path)
}

/// Stop-and-search records for one force and month, stamped with
/// `search_force` and `search_month`.
pub fn fetch_stops<F: HttpFetcher + ?Sized>(
    fetcher: &F,
    endpoints: &Endpoints,
    force: &str,
    date: &str,
) -> Result<Table, FetchError> {
    let url = endpoints.stops_force(force, date);
    let response = fetcher.get(&url)?;
    if !response.is_ok() {
        return Err(FetchError::Http {
            url,
            status: response.status,
        });
    }
    let records: Vec<Value> = response.json(&url)?;
    let mut table = Table::from_json_records(&records).ok_or_else(|| FetchError::Payload {
        url: url.clone(),
        reason: "expected a list of objects".to_string(),
    })?;
    table.stamp("search_force", force);
    table.stamp("search_month", date);
    Ok(table)
}
