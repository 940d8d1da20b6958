use crate::unit::unit::UnitId;

/// Handle of an edge inside a `Graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) usize);

/// Directed weighted connection from a predecessor to a successor unit.
///
/// Stored once in the graph and referenced from the `outgoing` list of
/// `from` and the `incoming` list of `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub(crate) from: UnitId,
    pub(crate) to: UnitId,
    pub(crate) weight: f64,
}

impl Edge {
    pub fn source(&self) -> UnitId {
        self.from
    }

    pub fn target(&self) -> UnitId {
        self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}
