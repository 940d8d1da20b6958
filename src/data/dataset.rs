//! Whitespace-delimited numeric datasets.
//!
//! Format:
//! - one sample per line, fields separated by any whitespace
//! - all columns but the last are features
//! - the last column is a 1-based class label (`1`, `2`, ...; `2.0` is
//!   accepted), stored zero-based
//! - blank lines are ignored

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Vec<f64>,
    /// Zero-based class index.
    pub class: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Dataset {
        Dataset { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Feature width of the first sample; every sample of a parsed dataset
    /// has the same width.
    pub fn num_features(&self) -> usize {
        self.samples.first().map_or(0, |s| s.features.len())
    }

    /// One more than the largest class index present.
    pub fn num_classes(&self) -> usize {
        self.samples.iter().map(|s| s.class + 1).max().unwrap_or(0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads and parses a dataset file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let text = fs::read_to_string(path.as_ref())?;
    let dataset = parse_dataset(&text)?;
    debug!(
        "loaded {} samples ({} features, {} classes) from {}",
        dataset.len(),
        dataset.num_features(),
        dataset.num_classes(),
        path.as_ref().display()
    );
    Ok(dataset)
}

/// Parses dataset text. Errors carry the 1-based line number.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let mut samples: Vec<Sample> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.is_empty() {
            continue;
        }
        if cells.len() < 2 {
            return Err(parse_error(
                line_no,
                format!("expected at least 2 columns (features + class), got {}", cells.len()),
            ));
        }

        let (feature_cells, label_cell) = cells.split_at(cells.len() - 1);
        let features = feature_cells
            .iter()
            .map(|c| parse_number(c, line_no))
            .collect::<Result<Vec<f64>>>()?;
        let class = parse_label(label_cell[0], line_no)?;

        if let Some(first) = samples.first() {
            if first.features.len() != features.len() {
                return Err(parse_error(
                    line_no,
                    format!(
                        "feature count {} does not match first row's {}",
                        features.len(),
                        first.features.len()
                    ),
                ));
            }
        }

        samples.push(Sample { features, class });
    }

    if samples.is_empty() {
        return Err(Error::EmptyDataset);
    }
    Ok(Dataset { samples })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn parse_error(line: usize, message: String) -> Error {
    Error::Parse { line, message }
}

fn parse_number(cell: &str, line: usize) -> Result<f64> {
    cell.parse::<f64>()
        .map_err(|_| parse_error(line, format!("'{}' is not a valid number", cell)))
}

/// 1-based label to zero-based class index.
fn parse_label(cell: &str, line: usize) -> Result<usize> {
    let value = parse_number(cell, line)?;
    if value < 1.0 || value.fract() != 0.0 || !value.is_finite() {
        return Err(parse_error(
            line,
            format!("class label '{}' is not a positive integer", cell),
        ));
    }
    Ok(value as usize - 1)
}
