pub mod epoch_stats;
pub mod loop_fn;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::{Accuracy, EpochStats};
pub use loop_fn::train_loop;
pub use train_config::{TrainConfig, TrainSettings};
pub use trainer::{evaluate, train_epoch};
