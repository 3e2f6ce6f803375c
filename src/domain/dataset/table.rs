use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Cell, Column};
use crate::domain::error::{AppError, Result};

/// Text encoding of the file a dataset was read from, reused when writing it back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// UTF-8 with a leading byte order mark
    Utf8Bom,
    Windows1252,
}

/// Ordered, uniquely named columns that all share one row count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
    encoding: TextEncoding,
}

impl Dataset {
    /// Build a dataset from a header and row-major records.
    ///
    /// Short records are padded with missing cells; long records are rejected.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        if headers.is_empty() {
            return Err(AppError::ParseError("Header row is empty".to_string()));
        }

        // blank names (an unnamed index column) are kept as-is and never looked up
        let mut seen = HashSet::new();
        for header in headers.iter().filter(|h| !h.trim().is_empty()) {
            if !seen.insert(header.as_str()) {
                return Err(AppError::ParseError(format!(
                    "Duplicate column name '{}'",
                    header
                )));
            }
        }

        let row_count = records.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(row_count)))
            .collect();

        for (row_idx, record) in records.into_iter().enumerate() {
            if record.len() > columns.len() {
                return Err(AppError::ParseError(format!(
                    "Row {} has {} fields, header has {}",
                    row_idx + 1,
                    record.len(),
                    columns.len()
                )));
            }

            let mut fields = record.into_iter();
            for column in columns.iter_mut() {
                let cell = fields.next().map(Cell::parse).unwrap_or_else(Cell::missing);
                column.cells.push(cell);
            }
        }

        Ok(Self {
            columns,
            row_count,
            encoding: TextEncoding::default(),
        })
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Replace the column with the same name in place, or append it.
    ///
    /// Returns `true` when an existing column was replaced.
    pub fn upsert_column(&mut self, column: Column) -> Result<bool> {
        if column.len() != self.row_count {
            return Err(AppError::ValidationError(format!(
                "Column '{}' has {} values, dataset has {} rows",
                column.name,
                column.len(),
                self.row_count
            )));
        }

        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => {
                *existing = column;
                Ok(true)
            }
            None => {
                self.columns.push(column);
                Ok(false)
            }
        }
    }

    /// Raw field text of one row, in column order
    pub fn row(&self, index: usize) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.cells.get(index).map(Cell::raw).unwrap_or(""))
            .collect()
    }
}
