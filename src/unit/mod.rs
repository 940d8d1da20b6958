pub mod edge;
pub mod report;
pub mod unit;

pub use edge::{Edge, EdgeId};
pub use report::UnitReport;
pub use unit::{Unit, UnitId, UnitKind};
