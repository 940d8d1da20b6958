use serde::{Deserialize, Serialize};

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};

/// Per-feature min-max scaling to `[0, 1]`. The class label is never scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl MinMax {
    /// Collects the minimum and maximum of every feature column.
    pub fn fit(dataset: &Dataset) -> Result<MinMax> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let width = dataset.num_features();
        let mut min = vec![f64::INFINITY; width];
        let mut max = vec![f64::NEG_INFINITY; width];
        for sample in dataset {
            if sample.features.len() != width {
                return Err(Error::FeatureMismatch {
                    expected: width,
                    got: sample.features.len(),
                });
            }
            for (j, &x) in sample.features.iter().enumerate() {
                min[j] = min[j].min(x);
                max[j] = max[j].max(x);
            }
        }
        Ok(MinMax { min, max })
    }

    pub fn width(&self) -> usize {
        self.min.len()
    }

    /// Rescales one feature vector in place: `(x - min) / (max - min)`.
    /// A constant column maps to `0.0`.
    pub fn scale(&self, features: &mut [f64]) -> Result<()> {
        if features.len() != self.width() {
            return Err(Error::FeatureMismatch {
                expected: self.width(),
                got: features.len(),
            });
        }
        for ((x, &lo), &hi) in features.iter_mut().zip(&self.min).zip(&self.max) {
            let range = hi - lo;
            *x = if range == 0.0 { 0.0 } else { (*x - lo) / range };
        }
        Ok(())
    }

    /// Rescales every sample of `dataset` in place.
    pub fn normalize(&self, dataset: &mut Dataset) -> Result<()> {
        for sample in &mut dataset.samples {
            self.scale(&mut sample.features)?;
        }
        Ok(())
    }
}

/// Fits a `MinMax` on `dataset` and applies it, returning the fitted scaler.
pub fn normalize_dataset(dataset: &mut Dataset) -> Result<MinMax> {
    let scaler = MinMax::fit(dataset)?;
    scaler.normalize(dataset)?;
    Ok(scaler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::parse_dataset;

    #[test]
    fn features_land_in_unit_interval() {
        let mut ds = parse_dataset("2 10 1\n4 20 2\n3 15 1\n").unwrap();
        let scaler = normalize_dataset(&mut ds).unwrap();
        assert_eq!(scaler.min, vec![2.0, 10.0]);
        assert_eq!(scaler.max, vec![4.0, 20.0]);
        assert_eq!(ds.samples[0].features, vec![0.0, 0.0]);
        assert_eq!(ds.samples[1].features, vec![1.0, 1.0]);
        assert_eq!(ds.samples[2].features, vec![0.5, 0.5]);
    }

    #[test]
    fn labels_are_untouched() {
        let mut ds = parse_dataset("2 10 3\n4 20 2\n").unwrap();
        normalize_dataset(&mut ds).unwrap();
        let classes: Vec<_> = ds.iter().map(|s| s.class).collect();
        assert_eq!(classes, vec![2, 1]);
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let mut ds = parse_dataset("5 1 1\n5 3 2\n").unwrap();
        normalize_dataset(&mut ds).unwrap();
        assert_eq!(ds.samples[0].features[0], 0.0);
        assert_eq!(ds.samples[1].features[0], 0.0);
        assert!(ds.iter().all(|s| s.features.iter().all(|x| x.is_finite())));
    }

    #[test]
    fn scale_rejects_wrong_width() {
        let ds = parse_dataset("1 2 1\n3 4 1\n").unwrap();
        let scaler = MinMax::fit(&ds).unwrap();
        let mut row = vec![1.0];
        assert!(matches!(
            scaler.scale(&mut row),
            Err(Error::FeatureMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn empty_dataset_cannot_be_fitted() {
        assert!(matches!(MinMax::fit(&Dataset::default()), Err(Error::EmptyDataset)));
    }
}
