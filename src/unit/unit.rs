use std::fmt;

use crate::activation::activation::ActivationFunction;
use crate::unit::edge::EdgeId;

/// Handle of a unit inside a `Graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub(crate) usize);

impl UnitId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a unit is, together with the state only that kind carries.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitKind {
    /// Pass-through input holder; its value is set from outside.
    Sensor,
    /// Computes its value from weighted predecessor values plus a bias.
    Neuron {
        bias: f64,
        activation: ActivationFunction,
    },
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Sensor => write!(f, "Sensor"),
            UnitKind::Neuron { .. } => write!(f, "Neuron"),
        }
    }
}

/// A single node of the graph.
///
/// Edges are not owned by the unit: `incoming` and `outgoing` hold handles
/// into the graph's edge arena, so both endpoints of a connection always
/// observe the same weight.
#[derive(Debug, Clone)]
pub struct Unit {
    pub(crate) name: String,
    pub(crate) kind: UnitKind,
    pub(crate) value: f64,
    pub(crate) error: f64,
    pub(crate) incoming: Vec<EdgeId>,
    pub(crate) outgoing: Vec<EdgeId>,
}

impl Unit {
    pub fn sensor(name: impl Into<String>) -> Unit {
        Unit::with_kind(name.into(), UnitKind::Sensor)
    }

    pub fn neuron(name: impl Into<String>, activation: ActivationFunction, bias: f64) -> Unit {
        Unit::with_kind(name.into(), UnitKind::Neuron { bias, activation })
    }

    fn with_kind(name: String, kind: UnitKind) -> Unit {
        Unit {
            name,
            kind,
            value: 0.0,
            error: 0.0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    pub fn is_neuron(&self) -> bool {
        matches!(self.kind, UnitKind::Neuron { .. })
    }

    /// Last computed or sensed output.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Last backpropagated error signal; meaningful only after a training step.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Bias of a neuron, `None` for a sensor.
    pub fn bias(&self) -> Option<f64> {
        match self.kind {
            UnitKind::Neuron { bias, .. } => Some(bias),
            UnitKind::Sensor => None,
        }
    }

    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    /// Activation used for the error derivative. Sensors carry none and fall
    /// back to the network-wide sigmoid.
    pub(crate) fn activation(&self) -> ActivationFunction {
        match self.kind {
            UnitKind::Neuron { activation, .. } => activation,
            UnitKind::Sensor => ActivationFunction::default(),
        }
    }

    /// `f'(value)` of this unit's activation.
    pub(crate) fn derivative(&self) -> f64 {
        self.activation().derivative(self.value)
    }
}
