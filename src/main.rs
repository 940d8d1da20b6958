//! Trains a three-layer perceptron on a whitespace-delimited dataset and
//! reports its accuracy on the same rows.
//!
//! Usage:
//! ```text
//! cargo run --release -- data/seeds_dataset.txt --hidden 5 --epochs 1000 --rate 0.3
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use graph_perceptron::data::{load_dataset, normalize_dataset};
use graph_perceptron::train::{evaluate, train_loop, TrainConfig, TrainSettings};
use graph_perceptron::Network;

#[derive(Parser, Debug)]
#[command(author, version, about = "Train a graph-based perceptron on a numeric dataset")]
struct Args {
    /// Dataset file: feature columns followed by a 1-based class label
    dataset: PathBuf,

    /// JSON settings file; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hidden units
    #[arg(long)]
    hidden: Option<usize>,

    /// Training epochs
    #[arg(long)]
    epochs: Option<usize>,

    /// Learning rate
    #[arg(long)]
    rate: Option<f64>,

    /// Seed for weight initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Dump every unit after training (needs RUST_LOG=debug)
    #[arg(long)]
    tree: bool,
}

impl Args {
    fn settings(&self) -> Result<TrainSettings> {
        let mut settings = match &self.config {
            Some(path) => TrainSettings::load_json(path)
                .with_context(|| format!("reading settings from {}", path.display()))?,
            None => TrainSettings::default(),
        };
        if let Some(hidden) = self.hidden {
            settings.hidden = hidden;
        }
        if let Some(epochs) = self.epochs {
            settings.epochs = epochs;
        }
        if let Some(rate) = self.rate {
            settings.learning_rate = rate;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = args.settings()?;

    println!("Perceptron");
    println!("==========\n");

    let mut dataset = load_dataset(&args.dataset)
        .with_context(|| format!("loading dataset {}", args.dataset.display()))?;
    normalize_dataset(&mut dataset)?;

    let (inputs, outputs) = (dataset.num_features(), dataset.num_classes());
    let mut network = match settings.seed {
        Some(seed) => Network::with_rng(inputs, settings.hidden, outputs, &mut StdRng::seed_from_u64(seed)),
        None => Network::new(inputs, settings.hidden, outputs),
    }
    .context("building network")?;
    info!("network {}-{}-{}, settings {:?}", inputs, settings.hidden, outputs, settings);

    println!("Training....");
    let history = train_loop(&mut network, &dataset, &TrainConfig::from_settings(&settings))?;
    let final_error = history.last().map_or(0.0, |s| s.sum_error);
    println!("Final error on {} epochs: {:.6}", history.len(), final_error);

    if args.tree {
        network.log_tree();
    }

    println!("\nPredicting....");
    let accuracy = evaluate(&mut network, &dataset)?;
    println!(
        "Accuracy on {} predictions: {:.2}%",
        accuracy.total,
        accuracy.percent()
    );

    Ok(())
}
