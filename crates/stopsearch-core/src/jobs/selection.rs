//! Caller input for one axis (dates or forces) of `add_job`.

use serde_json::Value;
use thiserror::Error;

/// Which values to use along one axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// Every value the registry knows for this axis.
    #[default]
    All,
    /// Explicit candidates. Non-string values are dropped before use.
    Only(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{axis} must be a list, got {got}")]
pub struct SelectionError {
    pub axis: &'static str,
    pub got: String,
}

impl Selection {
    /// Explicit list of strings.
    pub fn only<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Only(items.into_iter().map(|s| Value::String(s.into())).collect())
    }

    /// Build from untyped input: missing or null means `All`, an array means
    /// `Only`, anything else is rejected.
    pub fn from_json(axis: &'static str, value: Option<&Value>) -> Result<Self, SelectionError> {
        match value {
            None | Some(Value::Null) => Ok(Selection::All),
            Some(Value::Array(items)) => Ok(Selection::Only(items.clone())),
            Some(other) => Err(SelectionError {
                axis,
                got: other.to_string(),
            }),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// Candidates split into usable strings and everything else.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partitioned {
    pub accepted: Vec<String>,
    pub rejected: Vec<Value>,
}

pub fn partition_strings(values: Vec<Value>) -> Partitioned {
    let mut out = Partitioned::default();
    for v in values {
        match v {
            Value::String(s) => out.accepted.push(s),
            other => out.rejected.push(other),
        }
    }
    out
}
