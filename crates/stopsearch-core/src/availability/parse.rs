//! Decode the availability payload into records.
//!
//! Each upstream row is one month with the forces that have data for it.
//! Current payloads carry the forces as a JSON list; older captures store
//! them as a single string such as `"['avon-and-somerset', 'btp']"`.

use serde::Deserialize;

use super::{AvailabilityRecord, DataKind};

/// The two shapes the force list has been published in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ForceList {
    List(Vec<String>),
    Literal(String),
}

impl ForceList {
    /// Normalize either shape to an ordered list of force identifiers.
    pub fn into_forces(self) -> Vec<String> {
        match self {
            ForceList::List(forces) => forces,
            ForceList::Literal(raw) => literal_to_list(&raw),
        }
    }
}

/// One row of the availability listing.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRow {
    pub date: String,
    /// Missing or `null` means the month has no forces.
    #[serde(rename = "stop-and-search", default)]
    pub forces: Option<ForceList>,
}

/// Parse a bracketed, comma separated literal, dropping quotes and spaces.
pub fn literal_to_list(raw: &str) -> Vec<String> {
    let inner = raw
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');
    let cleaned: String = inner
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Vec::new();
    }
    cleaned.split(',').map(str::to_string).collect()
}

/// Explode rows into one record per (month, force), in payload order.
/// Force identifiers are lowercased.
pub fn explode(rows: Vec<AvailabilityRow>) -> Vec<AvailabilityRecord> {
    rows.into_iter()
        .flat_map(|row| {
            let date = row.date;
            row.forces
                .map(ForceList::into_forces)
                .unwrap_or_default()
                .into_iter()
                .map(move |force| AvailabilityRecord {
                    date: date.clone(),
                    force: force.to_lowercase(),
                    kind: DataKind::StopAndSearch,
                })
        })
        .collect()
}
