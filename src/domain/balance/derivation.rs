use serde::Serialize;

use super::{DerivedFeature, StatusCounts};
use crate::domain::dataset::{Column, Dataset};
use crate::domain::error::Result;

/// Min and max of the non-missing values of a column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// `None` when every value is missing
    pub fn of(values: &[Option<f64>]) -> Option<Self> {
        values.iter().flatten().fold(None, |range, &v| {
            Some(match range {
                None => ValueRange { min: v, max: v },
                Some(r) => ValueRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                },
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddedColumn {
    pub name: String,
    pub formula: String,
    pub range: Option<ValueRange>,
    pub status: StatusCounts,
    /// The column already existed and was recomputed in place
    pub replaced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedColumn {
    pub name: String,
    pub missing_sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DerivationOutcome {
    Added(AddedColumn),
    Skipped(SkippedColumn),
}

/// Compute `feature` row-wise and store it in `dataset`.
///
/// Absent source columns are not an error: the feature is skipped and the missing
/// names are returned. A missing operand yields a missing result for that row.
pub fn derive_feature(dataset: &mut Dataset, feature: &DerivedFeature) -> Result<DerivationOutcome> {
    let (minuend, subtrahend) = match (
        dataset.column(feature.minuend),
        dataset.column(feature.subtrahend),
    ) {
        (Some(a), Some(b)) => (a.numeric_values()?, b.numeric_values()?),
        _ => {
            let missing_sources = feature
                .sources()
                .iter()
                .filter(|name| !dataset.has_column(name))
                .map(|name| name.to_string())
                .collect();
            return Ok(DerivationOutcome::Skipped(SkippedColumn {
                name: feature.name.to_string(),
                missing_sources,
            }));
        }
    };

    let values: Vec<Option<f64>> = minuend
        .iter()
        .zip(subtrahend.iter())
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(a - b).filter(|v| !v.is_nan()),
            _ => None,
        })
        .collect();

    let range = ValueRange::of(&values);
    let status = StatusCounts::tally(&values);
    let replaced = dataset.upsert_column(Column::from_numbers(feature.name, &values))?;

    Ok(DerivationOutcome::Added(AddedColumn {
        name: feature.name.to_string(),
        formula: feature.formula(),
        range,
        status,
        replaced,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::balance::ECO_BALANCE_FEATURES;
    use crate::domain::error::AppError;

    fn dataset(headers: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::from_records(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn numbers(dataset: &Dataset, name: &str) -> Vec<Option<f64>> {
        dataset.column(name).unwrap().numeric_values().unwrap()
    }

    #[test]
    fn test_both_features_derived() {
        let mut ds = dataset(
            &[
                "total_BiocapPerCap",
                "total_EFConsPerCap",
                "total_BiocapTotGHA",
                "total_EFConsTotGHA",
            ],
            &[&["2.5", "1.8", "100.0", "150.0"]],
        );

        for feature in &ECO_BALANCE_FEATURES {
            let outcome = derive_feature(&mut ds, feature).unwrap();
            assert!(matches!(outcome, DerivationOutcome::Added(_)));
        }

        let percap = numbers(&ds, "eco_balance_percap")[0].unwrap();
        assert!((percap - 0.7).abs() < 1e-12);
        assert_eq!(numbers(&ds, "eco_balance_total"), vec![Some(-50.0)]);
        assert_eq!(ds.row(0)[5], "-50.0");
        assert_eq!(ds.column_count(), 6);
    }

    #[test]
    fn test_missing_operand_propagates() {
        let mut ds = dataset(
            &["total_BiocapPerCap", "total_EFConsPerCap"],
            &[&["1.0", ""], &["", "2.0"], &["3.0", "1.0"]],
        );

        let outcome = derive_feature(&mut ds, &ECO_BALANCE_FEATURES[0]).unwrap();

        assert_eq!(numbers(&ds, "eco_balance_percap"), vec![None, None, Some(2.0)]);
        match outcome {
            DerivationOutcome::Added(added) => {
                assert_eq!(added.range, Some(ValueRange { min: 2.0, max: 2.0 }));
                assert_eq!(added.status.unknown, 2);
                assert_eq!(added.status.reserve, 1);
                assert!(!added.replaced);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_absent_sources_skip_without_error() {
        let mut ds = dataset(&["total_BiocapTotGHA", "year"], &[&["10", "2020"]]);

        let outcome = derive_feature(&mut ds, &ECO_BALANCE_FEATURES[1]).unwrap();

        assert_eq!(
            outcome,
            DerivationOutcome::Skipped(SkippedColumn {
                name: "eco_balance_total".to_string(),
                missing_sources: vec!["total_EFConsTotGHA".to_string()],
            })
        );
        assert!(!ds.has_column("eco_balance_total"));
        assert_eq!(ds.column_count(), 2);
    }

    #[test]
    fn test_non_numeric_source_is_parse_error() {
        let mut ds = dataset(
            &["total_BiocapPerCap", "total_EFConsPerCap"],
            &[&["1.0", "lots"]],
        );

        let err = derive_feature(&mut ds, &ECO_BALANCE_FEATURES[0]).unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
        assert!(!ds.has_column("eco_balance_percap"));
    }

    #[test]
    fn test_rederive_replaces_in_place_with_same_values() {
        let mut ds = dataset(
            &["total_BiocapPerCap", "total_EFConsPerCap", "note"],
            &[&["2.5", "1.8", "a"], &["0.4", "1.1", "b"]],
        );

        derive_feature(&mut ds, &ECO_BALANCE_FEATURES[0]).unwrap();
        let first = ds.clone();
        let outcome = derive_feature(&mut ds, &ECO_BALANCE_FEATURES[0]).unwrap();

        assert_eq!(ds, first);
        assert!(matches!(outcome, DerivationOutcome::Added(AddedColumn { replaced: true, .. })));
    }

    #[test]
    fn test_value_range_all_missing() {
        assert_eq!(ValueRange::of(&[None, None]), None);
    }
}
