use crate::data::dataset::Dataset;
use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::Accuracy;

/// One pass over `dataset` in order, one `Network::train` call per sample.
/// Returns the summed squared error of the pass.
pub fn train_epoch(network: &mut Network, dataset: &Dataset, rate: f64) -> Result<f64> {
    let mut sum_error = 0.0;
    for sample in dataset {
        sum_error += network.train(rate, &sample.features, sample.class)?;
    }
    Ok(sum_error)
}

/// Predicts every sample and counts the matches with its class.
pub fn evaluate(network: &mut Network, dataset: &Dataset) -> Result<Accuracy> {
    let mut correct = 0;
    for sample in dataset {
        if network.predict(&sample.features)? == sample.class {
            correct += 1;
        }
    }
    Ok(Accuracy {
        correct,
        total: dataset.len(),
    })
}
