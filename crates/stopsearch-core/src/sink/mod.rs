//! Tabular file persistence.
//!
//! A sink writes a [`Table`] with a header row and reads one back. Column
//! order is preserved but callers should address columns by name.

mod delimited;

pub use delimited::DelimitedSink;

use anyhow::Result;
use std::path::Path;

use crate::config::OutputFormat;
use crate::table::Table;

pub trait TableSink {
    /// File extension without the dot (e.g. `csv`).
    fn extension(&self) -> &str;

    /// Write `table` to `path`, replacing any existing file.
    fn write(&self, table: &Table, path: &Path) -> Result<()>;

    /// Read a file previously written by this sink.
    fn read(&self, path: &Path) -> Result<Table>;
}

/// Sink for the configured output format.
pub fn for_format(format: OutputFormat) -> DelimitedSink {
    match format {
        OutputFormat::Csv => DelimitedSink::csv(),
        OutputFormat::Tsv => DelimitedSink::tsv(),
    }
}
