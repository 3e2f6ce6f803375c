// ============================================================
// COLUMN DERIVER USE CASE
// ============================================================
// Read a features file, add the ecological balance columns, write it back

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::balance::{
    derive_feature, AddedColumn, DerivationOutcome, DerivedFeature, SkippedColumn,
    ECO_BALANCE_FEATURES,
};
use crate::domain::dataset::Dataset;
use crate::domain::error::Result;
use crate::infrastructure::csv::{CsvReader, CsvWriter};

/// Summary of one derivation run
#[derive(Debug, Clone, Serialize)]
pub struct DeriveReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,

    /// `(rows, columns)` as read
    pub shape_before: (usize, usize),

    /// `(rows, columns)` as written
    pub shape_after: (usize, usize),

    pub added: Vec<AddedColumn>,
    pub skipped: Vec<SkippedColumn>,

    pub processing_time_ms: u64,
}

pub struct ColumnDeriver {
    reader: CsvReader,
    writer: CsvWriter,
    features: Vec<DerivedFeature>,
}

impl Default for ColumnDeriver {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl ColumnDeriver {
    /// Deriver for the two ecological balance columns
    pub fn new(delimiter: u8) -> Self {
        Self::with_features(delimiter, ECO_BALANCE_FEATURES.to_vec())
    }

    pub fn with_features(delimiter: u8, features: Vec<DerivedFeature>) -> Self {
        Self {
            reader: CsvReader::new().with_delimiter(delimiter),
            writer: CsvWriter::new().with_delimiter(delimiter),
            features,
        }
    }

    /// Derive into `output_path`, or over `input_path` when it is `None`
    pub fn derive(&self, input_path: &Path, output_path: Option<&Path>) -> Result<Dataset> {
        self.derive_with_report(input_path, output_path)
            .map(|(dataset, _)| dataset)
    }

    pub fn derive_with_report(
        &self,
        input_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<(Dataset, DeriveReport)> {
        let start = Instant::now();
        let output_path = output_path.unwrap_or(input_path);

        info!("Reading {}...", input_path.display());
        let mut dataset = self.reader.read_file(input_path)?;
        let shape_before = dataset.shape();

        info!("Original shape: {:?}", shape_before);
        info!(
            "Columns containing 'Biocap': {:?}",
            columns_containing(&dataset, "Biocap")
        );
        info!(
            "Columns containing 'EFCons': {:?}",
            columns_containing(&dataset, "EFCons")
        );

        let (added, skipped) = self.apply_features(&mut dataset)?;

        self.writer.write_file(&dataset, output_path)?;
        info!("Features saved to: {}", output_path.display());
        info!("Final shape: {:?}", dataset.shape());

        let report = DeriveReport {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            shape_before,
            shape_after: dataset.shape(),
            added,
            skipped,
            processing_time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        Ok((dataset, report))
    }

    /// Run every feature against an in-memory dataset
    pub fn apply_features(
        &self,
        dataset: &mut Dataset,
    ) -> Result<(Vec<AddedColumn>, Vec<SkippedColumn>)> {
        let mut added = Vec::new();
        let mut skipped = Vec::new();

        for feature in &self.features {
            match derive_feature(dataset, feature)? {
                DerivationOutcome::Added(column) => {
                    info!("Added {}", column.formula);
                    if let Some(range) = column.range {
                        info!(
                            "   Range: {} to {}",
                            feature.range_format.render(range.min),
                            feature.range_format.render(range.max)
                        );
                    }
                    info!(
                        reserve = column.status.reserve,
                        deficit = column.status.deficit,
                        balanced = column.status.balanced,
                        unknown = column.status.unknown,
                        replaced = column.replaced,
                        "   Balance status for {}",
                        column.name
                    );
                    added.push(column);
                }
                DerivationOutcome::Skipped(column) => {
                    warn!(
                        feature = %column.name,
                        "Missing columns: {:?}",
                        column.missing_sources
                    );
                    skipped.push(column);
                }
            }
        }

        Ok((added, skipped))
    }
}

fn columns_containing<'a>(dataset: &'a Dataset, needle: &str) -> Vec<&'a str> {
    dataset
        .column_names()
        .into_iter()
        .filter(|name| name.contains(needle))
        .collect()
}
