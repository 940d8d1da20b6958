use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::train::epoch_stats::EpochStats;

/// Serializable run settings, as stored in a JSON settings file.
///
/// Missing fields fall back to `Default`: 1000 epochs at rate 0.3 with five
/// hidden units and an unseeded generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainSettings {
    pub epochs: usize,
    pub learning_rate: f64,
    pub hidden: usize,
    /// Seed for weight initialization; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for TrainSettings {
    fn default() -> Self {
        TrainSettings {
            epochs: 1000,
            learning_rate: 0.3,
            hidden: 5,
            seed: None,
        }
    }
}

impl TrainSettings {
    /// Serializes the settings to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes settings from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<TrainSettings> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`: full passes over the dataset
/// - `learning_rate`: step size handed to every `Network::train` call
/// - `progress_tx`: optional sender; one `EpochStats` per completed
///   epoch. The loop stops early once the receiver is gone.
/// - `stop_flag`: optional flag; when set from another thread the loop
///   stops after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn from_settings(settings: &TrainSettings) -> Self {
        TrainConfig::new(settings.epochs, settings.learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let settings: TrainSettings = serde_json::from_str(r#"{ "epochs": 50 }"#).unwrap();
        assert_eq!(settings.epochs, 50);
        assert_eq!(settings.learning_rate, 0.3);
        assert_eq!(settings.hidden, 5);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn settings_survive_a_file() {
        let path = std::env::temp_dir().join(format!("graph-perceptron-{}.json", std::process::id()));
        let settings = TrainSettings {
            epochs: 20,
            learning_rate: 0.1,
            hidden: 3,
            seed: Some(9),
        };
        settings.save_json(&path).unwrap();
        let loaded = TrainSettings::load_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn config_copies_settings() {
        let config = TrainConfig::from_settings(&TrainSettings::default());
        assert_eq!(config.epochs, 1000);
        assert_eq!(config.learning_rate, 0.3);
        assert!(config.progress_tx.is_none() && config.stop_flag.is_none());
    }
}
