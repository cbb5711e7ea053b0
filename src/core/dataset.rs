//! Labelled reference samples for the gesture classifier.
//!
//! The on-disk format is a plain CSV table: fifteen angle columns followed by
//! the label id. A leading header row with no numeric cells and blank lines
//! are tolerated.

use crate::core::features::{AngleVector, ANGLE_COUNT};
use crate::core::gesture::GestureLabel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a reference dataset. All of them are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
    #[error("line {line}: label {label} is not a known gesture id (0-21)")]
    UnknownLabel { line: usize, label: String },
    #[error("reference dataset contains no samples")]
    Empty,
}

/// A single labelled training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSample {
    pub angles: AngleVector,
    pub label: GestureLabel,
}

impl ReferenceSample {
    pub fn new(angles: AngleVector, label: GestureLabel) -> Self {
        Self { angles, label }
    }
}

/// An immutable, non-empty collection of reference samples.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    samples: Vec<ReferenceSample>,
}

impl ReferenceSet {
    pub fn new(samples: Vec<ReferenceSample>) -> Result<Self, DatasetError> {
        if samples.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { samples })
    }

    /// Load a dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_csv_str(&content)?;
        tracing::info!(
            "Loaded {} reference samples from {}",
            set.len(),
            path.display()
        );
        Ok(set)
    }

    /// Parse a dataset from CSV text.
    pub fn from_csv_str(content: &str) -> Result<Self, DatasetError> {
        let mut samples = Vec::new();
        let mut seen_first_row = false;

        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let row = raw.trim();
            if row.is_empty() {
                continue;
            }

            let first_row = !seen_first_row;
            seen_first_row = true;

            let cells: Vec<&str> = row.split(',').map(str::trim).collect();
            if first_row && cells.iter().all(|c| c.parse::<f64>().is_err()) {
                tracing::debug!("Skipping dataset header: {}", row);
                continue;
            }

            let values: Result<Vec<f64>, _> = cells.iter().map(|c| c.parse::<f64>()).collect();
            let values = match values {
                Ok(values) => values,
                Err(e) => {
                    return Err(DatasetError::MalformedRow {
                        line,
                        reason: format!("non-numeric cell ({e})"),
                    })
                }
            };

            samples.push(parse_row(line, &values)?);
        }

        Self::new(samples)
    }

    pub fn samples(&self) -> &[ReferenceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn parse_row(line: usize, values: &[f64]) -> Result<ReferenceSample, DatasetError> {
    if values.len() != ANGLE_COUNT + 1 {
        return Err(DatasetError::MalformedRow {
            line,
            reason: format!(
                "expected {} columns, found {}",
                ANGLE_COUNT + 1,
                values.len()
            ),
        });
    }

    let (angles, label) = values.split_at(ANGLE_COUNT);
    if let Some(bad) = angles.iter().find(|a| !a.is_finite()) {
        return Err(DatasetError::MalformedRow {
            line,
            reason: format!("angle {bad} is not finite"),
        });
    }

    let label_value = label[0];
    let integral = label_value.fract() == 0.0 && (0.0..=255.0).contains(&label_value);
    let label = integral
        .then(|| GestureLabel::from_id(label_value as u8))
        .flatten()
        .ok_or_else(|| DatasetError::UnknownLabel {
            line,
            label: label_value.to_string(),
        })?;

    let angles = AngleVector::try_from(angles).map_err(|len| DatasetError::MalformedRow {
        line,
        reason: format!("expected {ANGLE_COUNT} angles, found {len}"),
    })?;

    Ok(ReferenceSample::new(angles, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn row(angle: f64, label: &str) -> String {
        let mut cells = vec![format!("{angle:.6}"); ANGLE_COUNT];
        cells.push(label.to_string());
        cells.join(",")
    }

    #[test]
    fn test_parse_with_header_and_blank_lines() {
        let header = (0..ANGLE_COUNT)
            .map(|i| format!("a{i}"))
            .chain(std::iter::once("label".to_string()))
            .collect::<Vec<_>>()
            .join(",");
        let csv = format!(
            "{header}\n{}\n\n{}\n",
            row(10.0, "0.000000"),
            row(170.0, "21")
        );

        let set = ReferenceSet::from_csv_str(&csv).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.samples()[0].label, GestureLabel::Giyeok);
        assert_eq!(set.samples()[1].label, GestureLabel::Next);
        assert_eq!(set.samples()[1].angles.as_array()[0], 170.0);
    }

    #[test]
    fn test_unknown_label_is_fatal() {
        let csv = format!("{}\n{}\n", row(10.0, "3"), row(10.0, "22"));
        match ReferenceSet::from_csv_str(&csv) {
            Err(DatasetError::UnknownLabel { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }

        let csv = row(10.0, "2.5");
        assert!(matches!(
            ReferenceSet::from_csv_str(&csv),
            Err(DatasetError::UnknownLabel { .. })
        ));
    }

    #[test]
    fn test_wrong_column_count() {
        let csv = format!("{}\n1.0,2.0,3.0\n", row(5.0, "1"));
        match ReferenceSet::from_csv_str(&csv) {
            Err(DatasetError::MalformedRow { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("expected 16 columns"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_row_after_first_is_malformed() {
        let csv = format!("{}\nfoo,bar\n", row(5.0, "1"));
        assert!(matches!(
            ReferenceSet::from_csv_str(&csv),
            Err(DatasetError::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_typo_in_first_row_is_malformed() {
        let first = row(10.0, "3").replacen("10.000000", "1O.000000", 1);
        let csv = format!("{first}\n{}\n", row(20.0, "4"));

        match ReferenceSet::from_csv_str(&csv) {
            Err(DatasetError::MalformedRow { line, reason }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("non-numeric"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_dataset() {
        assert!(matches!(
            ReferenceSet::from_csv_str("a,b,c\n\n"),
            Err(DatasetError::Empty)
        ));
        assert!(matches!(
            ReferenceSet::new(Vec::new()),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", row(42.0, "10")).unwrap();

        let set = ReferenceSet::load(file.path()).unwrap();
        assert_eq!(set.samples()[0].label, GestureLabel::A);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            ReferenceSet::load(&missing),
            Err(DatasetError::Io { .. })
        ));
    }
}
