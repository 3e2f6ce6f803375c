// ============================================================
// CSV READER
// ============================================================
// Load a header-first delimited file into a Dataset

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::{debug, warn};

use crate::domain::dataset::{Dataset, TextEncoding};
use crate::domain::error::{AppError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Delimited-text reader producing a `Dataset`
pub struct CsvReader {
    /// Delimiter byte (default: comma)
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read and parse a file
    pub fn read_file(&self, path: &Path) -> Result<Dataset> {
        let (content, encoding) = self.read_with_encoding_detection(path)?;
        Ok(self.parse_content(&content)?.with_encoding(encoding))
    }

    /// Parse delimited content; the first record is the header
    pub fn parse_content(&self, content: &str) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::None)
            .flexible(true) // row length is checked against the header in Dataset
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
            return Err(AppError::ParseError(
                "No columns to parse from file".to_string(),
            ));
        }

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            records.push(record.iter().map(str::to_string).collect());
        }

        Dataset::from_records(headers, records)
    }

    /// Read bytes as UTF-8, falling back to Windows-1252
    fn read_with_encoding_detection(&self, path: &Path) -> Result<(String, TextEncoding)> {
        // any failure to open or read the input counts as "not found"
        let buffer = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
            _ => AppError::NotFound(format!("{} is not readable: {}", path.display(), e)),
        })?;

        let (content, _, had_errors) = UTF_8.decode(&buffer);
        if !had_errors {
            debug!(path = %path.display(), bytes = buffer.len(), "Decoded input as UTF-8");
            let encoding = if buffer.starts_with(UTF8_BOM) {
                TextEncoding::Utf8Bom
            } else {
                TextEncoding::Utf8
            };
            return Ok((content.into_owned(), encoding));
        }

        // written back in the same encoding, see CsvWriter::encode
        warn!(path = %path.display(), "Input is not valid UTF-8, decoding as Windows-1252");
        let (content, _, _) = WINDOWS_1252.decode(&buffer);
        Ok((content.into_owned(), TextEncoding::Windows1252))
    }
}
