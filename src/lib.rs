pub mod activation;
pub mod data;
pub mod error;
pub mod network;
pub mod train;
pub mod unit;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use data::dataset::{Dataset, Sample};
pub use error::{Error, Result};
pub use network::network::Network;
pub use network::spec::{NetworkSpec, Parameters};
pub use train::loop_fn::train_loop;
pub use train::train_config::{TrainConfig, TrainSettings};
pub use unit::unit::{Unit, UnitId, UnitKind};
