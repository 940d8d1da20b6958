pub mod builtin;
pub mod dataset;
pub mod normalize;

pub use builtin::toy_dataset;
pub use dataset::{load_dataset, parse_dataset, Dataset, Sample};
pub use normalize::{normalize_dataset, MinMax};
