//! CSV/TSV sink: quoted fields, CRLF-tolerant reader.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::mem::take;
use std::path::Path;

use super::TableSink;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedSink {
    sep: char,
    extension: &'static str,
}

impl DelimitedSink {
    pub fn csv() -> Self {
        Self {
            sep: ',',
            extension: "csv",
        }
    }

    pub fn tsv() -> Self {
        Self {
            sep: '\t',
            extension: "tsv",
        }
    }

    pub fn separator(&self) -> char {
        self.sep
    }
}

impl TableSink for DelimitedSink {
    fn extension(&self) -> &str {
        self.extension
    }

    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        let file = fs::File::create(path)
            .with_context(|| format!("create {}", path.display()))?;
        let mut w = BufWriter::new(file);
        write_row(&mut w, table.columns(), self.sep)?;
        for row in table.rows() {
            write_row(&mut w, row, self.sep)?;
        }
        w.flush()
            .with_context(|| format!("flush {}", path.display()))?;
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<Table> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        let mut rows = parse_rows(&text, self.sep);
        if rows.is_empty() {
            anyhow::bail!("{} has no header row", path.display());
        }
        let header = rows.remove(0);
        Ok(Table::from_parts(header, rows))
    }
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row to any writer.
pub(crate) fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Split delimited text into rows. Quotes may span separators and newlines.
pub(crate) fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Trailing row without a final newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
