//! In-memory table of named string columns.
//!
//! Built from the JSON record lists the API returns, then handed to a
//! [`TableSink`](crate::sink::TableSink) for persistence.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build from header and rows; short rows are padded, long rows truncated.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Set `name` to `value` on every row, adding the column if missing.
    pub fn stamp(&mut self, name: &str, value: &str) {
        let idx = match self.column_index(name) {
            Some(i) => i,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.columns.len() - 1
            }
        };
        for row in &mut self.rows {
            row[idx] = value.to_string();
        }
    }

    /// Build a table from a list of JSON objects.
    ///
    /// Columns appear in first-seen order across records. Nested objects are
    /// flattened into dotted names (`location.street.name`), nulls become
    /// empty cells and arrays are kept as JSON text. Returns `None` if any
    /// element is not an object.
    pub fn from_json_records(records: &[Value]) -> Option<Self> {
        let mut table = Table::default();
        let mut flat_rows = Vec::with_capacity(records.len());
        for record in records {
            let obj = record.as_object()?;
            let mut flat = Vec::new();
            flatten("", obj, &mut flat);
            for (name, _) in &flat {
                if table.column_index(name).is_none() {
                    table.columns.push(name.clone());
                }
            }
            flat_rows.push(flat);
        }
        for flat in flat_rows {
            let mut row = vec![String::new(); table.columns.len()];
            for (name, cell) in flat {
                if let Some(idx) = table.column_index(&name) {
                    row[idx] = cell;
                }
            }
            table.rows.push(row);
        }
        Some(table)
    }
}

fn flatten(prefix: &str, obj: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, value) in obj {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten(&name, inner, out),
            other => out.push((name, cell_text(other))),
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
