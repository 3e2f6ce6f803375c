use serde::{Deserialize, Serialize};

/// Field spellings read as a missing value (compared after trimming)
const MISSING_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A", "-nan"];

/// How a field's raw text was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Missing,
    Number(f64),
    Text,
}

/// A single field: the text as it appeared in the file plus its interpretation.
///
/// Keeping the raw text lets untouched columns be written back exactly as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    raw: String,
    value: CellValue,
}

impl Cell {
    /// Interpret a raw field
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();

        let value = if MISSING_TOKENS.contains(&trimmed) {
            CellValue::Missing
        } else {
            match trimmed.parse::<f64>() {
                Ok(number) if number.is_nan() => CellValue::Missing,
                Ok(number) => CellValue::Number(number),
                Err(_) => CellValue::Text,
            }
        };

        Self { raw, value }
    }

    /// A missing cell, written as an empty field
    pub fn missing() -> Self {
        Self {
            raw: String::new(),
            value: CellValue::Missing,
        }
    }

    /// A computed cell; `None` and NaN both become missing
    pub fn number(value: Option<f64>) -> Self {
        match value {
            Some(number) if !number.is_nan() => Self {
                raw: format_number(number),
                value: CellValue::Number(number),
            },
            _ => Self::missing(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> CellValue {
        self.value
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            CellValue::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.value == CellValue::Missing
    }
}

/// Shortest text that parses back to the same `f64`.
///
/// Integral values keep a trailing `.0` (`-50.0`, not `-50`).
pub fn format_number(value: f64) -> String {
    format!("{:?}", value)
}
