//! In-process queue of (month, force) download jobs.
//!
//! Each `add_job` call contributes the deduplicated cross-product of its
//! dates and forces. Calls are not deduplicated against each other; the
//! queue simply grows, which is fine for the few thousand pairs the API
//! exposes. A dedup-on-insert policy would be needed for anything larger.

mod selection;

pub use selection::{partition_strings, Partitioned, Selection, SelectionError};

use serde_json::Value;
use std::collections::HashSet;

use crate::availability::AvailabilityRegistry;

/// Execution outcome of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    NotDone,
    Done,
    Error,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::NotDone => "not_done",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Month token as given by the caller; not canonicalized.
    pub date: String,
    /// Lowercased force identifier.
    pub force: String,
    /// `date` was listed by the registry when the job was added.
    pub valid_date: bool,
    /// `force` was listed by the registry when the job was added.
    pub valid_force: bool,
    pub status: JobStatus,
}

impl Job {
    /// Output file name for this job, e.g. `2019-08_cheshire.csv`.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}_{}.{}", self.date, self.force, extension)
    }

    /// Whether `date` and `force` can be used as a plain file name stem
    /// inside the save folder.
    pub fn has_safe_file_name(&self) -> bool {
        is_plain_component(&self.date) && is_plain_component(&self.force)
    }
}

fn is_plain_component(value: &str) -> bool {
    !value.is_empty() && !value.contains(&['/', '\\', '\0'][..]) && !value.contains("..")
}

/// Why an `add_job` call added nothing (or what it added).
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added,
    /// An axis was not a list; the call was rejected as a whole.
    Malformed(SelectionError),
    /// An axis asked for every known value but the registry is unknown.
    AvailabilityUnknown,
    /// After dropping non-string values an axis was empty.
    EmptyAfterFiltering,
}

/// Summary of one `add_job` call.
#[derive(Debug, Clone, PartialEq)]
pub struct AddJobReport {
    pub outcome: AddOutcome,
    /// Dates used for the cross-product.
    pub dates: Vec<String>,
    /// Forces used for the cross-product, lowercased.
    pub forces: Vec<String>,
    pub rejected_dates: Vec<Value>,
    pub rejected_forces: Vec<Value>,
    /// Number of jobs appended to the queue.
    pub added: usize,
}

impl AddJobReport {
    fn empty(outcome: AddOutcome) -> Self {
        Self {
            outcome,
            dates: Vec::new(),
            forces: Vec::new(),
            rejected_dates: Vec::new(),
            rejected_forces: Vec::new(),
            added: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobQueue {
    jobs: Vec<Job>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub(crate) fn jobs_mut(&mut self) -> &mut [Job] {
        &mut self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn count_status(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|j| j.status == status).count()
    }

    /// `add_job` with untyped axes, as read from a plan file.
    pub fn add_job_json(
        &mut self,
        registry: &AvailabilityRegistry,
        dates: Option<&Value>,
        forces: Option<&Value>,
    ) -> AddJobReport {
        let parsed = Selection::from_json("dates", dates)
            .and_then(|d| Selection::from_json("forces", forces).map(|f| (d, f)));
        match parsed {
            Ok((dates, forces)) => self.add_job(registry, dates, forces),
            Err(e) => {
                tracing::warn!("{}; job not added", e);
                AddJobReport::empty(AddOutcome::Malformed(e))
            }
        }
    }

    /// Append the cross-product of `dates` × `forces`, tagged with validity.
    pub fn add_job(
        &mut self,
        registry: &AvailabilityRegistry,
        dates: Selection,
        forces: Selection,
    ) -> AddJobReport {
        if dates.is_all() && forces.is_all() {
            tracing::info!("no dates or forces given; adding every available combination");
        }
        if (dates.is_all() || forces.is_all()) && registry.is_unknown() {
            tracing::warn!(
                "availability is unknown; cannot expand to all dates/forces, job not added"
            );
            return AddJobReport::empty(AddOutcome::AvailabilityUnknown);
        }

        let dates = resolve(dates, || registry.dates());
        let forces = resolve(forces, || registry.forces());
        for (axis, rejected) in [("dates", &dates.rejected), ("forces", &forces.rejected)] {
            if !rejected.is_empty() {
                let shown = Value::Array(rejected.clone()).to_string();
                tracing::warn!("{} must be strings; dropped {}", axis, shown);
            }
        }

        let date_list = dates.accepted;
        let force_list: Vec<String> = forces
            .accepted
            .into_iter()
            .map(|f| f.to_lowercase())
            .collect();

        let mut report = AddJobReport {
            outcome: AddOutcome::Added,
            dates: date_list,
            forces: force_list,
            rejected_dates: dates.rejected,
            rejected_forces: forces.rejected,
            added: 0,
        };
        if report.dates.is_empty() || report.forces.is_empty() {
            tracing::warn!("input list is empty after filtering; no jobs added");
            report.outcome = AddOutcome::EmptyAfterFiltering;
            return report;
        }

        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let before = self.jobs.len();
        for date in &report.dates {
            for force in &report.forces {
                if !seen.insert((date.as_str(), force.as_str())) {
                    continue;
                }
                self.jobs.push(Job {
                    date: date.clone(),
                    force: force.clone(),
                    valid_date: registry.contains_date(date),
                    valid_force: registry.contains_force(force),
                    status: JobStatus::NotDone,
                });
            }
        }
        report.added = self.jobs.len() - before;

        tracing::info!(
            dates = ?report.dates,
            forces = ?report.forces,
            added = report.added,
            "job added"
        );
        report
    }
}

fn resolve(selection: Selection, all: impl FnOnce() -> Vec<String>) -> Partitioned {
    match selection {
        Selection::All => Partitioned {
            accepted: all(),
            rejected: Vec::new(),
        },
        Selection::Only(values) => partition_strings(values),
    }
}

#[cfg(test)]
mod tests;
