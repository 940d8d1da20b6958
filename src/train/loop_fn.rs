use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info};

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs over `dataset`, in row order,
/// and returns the statistics of every completed epoch.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// `EmptyDataset` for an empty dataset; any error from `Network::train`
/// (feature width or class out of range) aborts the run.
pub fn train_loop(
    network: &mut Network,
    dataset: &Dataset,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();
        let sum_error = train_epoch(network, dataset, config.learning_rate)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            sum_error,
            elapsed_ms,
        };
        debug!("epoch {}/{}: error = {:.6}", epoch, config.epochs, sum_error);
        history.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    if let Some(last) = history.last() {
        info!(
            "trained {} epoch(s) on {} samples, final error {:.6}",
            last.epoch,
            dataset.len(),
            last.sum_error
        );
    }

    Ok(history)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::data::builtin::toy_dataset;

    fn toy_network(seed: u64) -> Network {
        Network::with_rng(2, 2, 2, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn records_every_epoch() {
        let mut net = toy_network(3);
        let history = train_loop(&mut net, &toy_dataset(), &TrainConfig::new(5, 0.3)).unwrap();
        let epochs: Vec<_> = history.iter().map(|s| s.epoch).collect();
        assert_eq!(epochs, vec![1, 2, 3, 4, 5]);
        assert!(history.iter().all(|s| s.total_epochs == 5 && s.sum_error > 0.0));
    }

    #[test]
    fn progress_is_sent_per_epoch() {
        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(4, 0.3);
        config.progress_tx = Some(tx);
        let mut net = toy_network(4);
        train_loop(&mut net, &toy_dataset(), &config).unwrap();
        drop(config);
        assert_eq!(rx.iter().count(), 4);
    }

    #[test]
    fn dropped_receiver_stops_the_run() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut config = TrainConfig::new(10, 0.3);
        config.progress_tx = Some(tx);
        let mut net = toy_network(5);
        let history = train_loop(&mut net, &toy_dataset(), &config).unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn stop_flag_prevents_training() {
        let mut config = TrainConfig::new(10, 0.3);
        config.stop_flag = Some(Arc::new(AtomicBool::new(true)));
        let mut net = toy_network(6);
        let before = net.graph().edges().to_vec();
        let history = train_loop(&mut net, &toy_dataset(), &config).unwrap();
        assert!(history.is_empty());
        assert_eq!(net.graph().edges(), &before[..]);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let mut net = toy_network(7);
        let result = train_loop(&mut net, &Dataset::default(), &TrainConfig::new(1, 0.1));
        assert!(matches!(result, Err(Error::EmptyDataset)));
    }
}
