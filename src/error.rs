use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building, training or feeding a network.
#[derive(Error, Debug)]
pub enum Error {
    /// A layer was requested with zero units.
    #[error("the {0} layer must contain at least one unit")]
    EmptyLayer(&'static str),

    /// An input vector did not match the size of the input layer.
    #[error("expected {expected} input value(s), but got {got}")]
    InputSize { expected: usize, got: usize },

    /// A target class does not address any output unit.
    #[error("target class {class} is out of range for {outputs} output unit(s)")]
    ClassOutOfRange { class: usize, outputs: usize },

    /// Pinned parameters do not fit the requested topology.
    #[error("expected {expected} {what}, but got {got}")]
    ParameterCount {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// A dataset line could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A dataset had no rows left after parsing.
    #[error("dataset contains no samples")]
    EmptyDataset,

    /// A dataset's feature width does not match the network or the fitted scaler.
    #[error("expected {expected} feature column(s), but got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
