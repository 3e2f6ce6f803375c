use serde::{Deserialize, Serialize};

use super::Cell;
use crate::domain::error::{AppError, Result};

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Build a column from computed values; `None` becomes a missing cell
    pub fn from_numbers(name: impl Into<String>, values: &[Option<f64>]) -> Self {
        Self::new(name, values.iter().map(|v| Cell::number(*v)).collect())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Numeric view of the column.
    ///
    /// Missing cells map to `None`. Any other non-numeric cell is an error naming the
    /// column and its 1-based data row.
    pub fn numeric_values(&self) -> Result<Vec<Option<f64>>> {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                if cell.is_missing() {
                    return Ok(None);
                }
                cell.as_number().map(Some).ok_or_else(|| {
                    AppError::ParseError(format!(
                        "Column '{}' row {}: value '{}' is not numeric",
                        self.name,
                        idx + 1,
                        cell.raw()
                    ))
                })
            })
            .collect()
    }
}
