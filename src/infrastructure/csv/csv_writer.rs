// ============================================================
// CSV WRITER
// ============================================================
// Serialize a Dataset and atomically replace the destination file

use std::fs;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use encoding_rs::WINDOWS_1252;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::dataset::{Dataset, TextEncoding};
use crate::domain::error::{AppError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write header and rows to any sink
    pub fn write_to<W: Write>(&self, dataset: &Dataset, sink: W) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(sink);

        writer
            .write_record(dataset.column_names())
            .map_err(|e| AppError::IoError(format!("Failed to write CSV header: {}", e)))?;

        for index in 0..dataset.row_count() {
            writer.write_record(dataset.row(index)).map_err(|e| {
                AppError::IoError(format!("Failed to write CSV row {}: {}", index + 1, e))
            })?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Render the dataset as text
    pub fn write_to_string(&self, dataset: &Dataset) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(dataset, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| AppError::IoError(e.to_string()))
    }

    /// Serialize in the encoding the dataset was read with
    pub fn encode(&self, dataset: &Dataset) -> Result<Vec<u8>> {
        match dataset.encoding() {
            TextEncoding::Utf8 => {
                let mut buffer = Vec::new();
                self.write_to(dataset, &mut buffer)?;
                Ok(buffer)
            }
            TextEncoding::Utf8Bom => {
                let mut buffer = UTF8_BOM.to_vec();
                self.write_to(dataset, &mut buffer)?;
                Ok(buffer)
            }
            TextEncoding::Windows1252 => {
                let text = self.write_to_string(dataset)?;
                let (bytes, _, unmappable) = WINDOWS_1252.encode(&text);
                if unmappable {
                    return Err(AppError::IoError(
                        "Dataset contains characters not representable in Windows-1252"
                            .to_string(),
                    ));
                }
                Ok(bytes.into_owned())
            }
        }
    }

    /// Write to a temporary file next to `path`, then rename it over `path`.
    ///
    /// The destination is either fully replaced or left as it was.
    pub fn write_file(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            AppError::IoError(format!("Failed to create temp file in {}: {}", dir.display(), e))
        })?;

        tmp.write_all(&self.encode(dataset)?)?;
        tmp.as_file().sync_all()?;

        // keep the mode of a file we are overwriting
        if let Ok(meta) = fs::metadata(path) {
            fs::set_permissions(tmp.path(), meta.permissions())?;
        }

        tmp.persist(path).map_err(|e| {
            AppError::IoError(format!("Failed to replace {}: {}", path.display(), e.error))
        })?;

        debug!(path = %path.display(), rows = dataset.row_count(), "Wrote dataset");
        Ok(())
    }
}
