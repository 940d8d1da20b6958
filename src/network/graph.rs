use crate::unit::edge::{Edge, EdgeId};
use crate::unit::report::UnitReport;
use crate::unit::unit::{Unit, UnitId, UnitKind};

/// Arena owning every unit and edge of a network.
///
/// Units address each other through `UnitId`/`EdgeId` handles. The traversal
/// operations below are recursive and mutate several units per call, so they
/// live here rather than on `Unit`. None of them check the unit kind or the
/// order they are called in: misuse gives wrong numbers, not a failure.
/// An unknown handle panics.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    units: Vec<Unit>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    pub fn add_unit(&mut self, unit: Unit) -> UnitId {
        self.units.push(unit);
        UnitId(self.units.len() - 1)
    }

    /// Adds a directed edge and registers it on both endpoints.
    pub fn connect(&mut self, from: UnitId, to: UnitId, weight: f64) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge { from, to, weight });
        self.units[from.0].outgoing.push(id);
        self.units[to.0].incoming.push(id);
        id
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn units(&self) -> impl Iterator<Item = (UnitId, &Unit)> {
        self.units.iter().enumerate().map(|(i, u)| (UnitId(i), u))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Weight of the edge `from -> to`, looked up from the predecessor side.
    pub fn outgoing_weight(&self, from: UnitId, to: UnitId) -> Option<f64> {
        self.units[from.0]
            .outgoing
            .iter()
            .map(|&e| &self.edges[e.0])
            .find(|edge| edge.to == to)
            .map(|edge| edge.weight)
    }

    /// Weight of the edge `from -> to`, looked up from the successor side.
    pub fn incoming_weight(&self, from: UnitId, to: UnitId) -> Option<f64> {
        self.units[to.0]
            .incoming
            .iter()
            .map(|&e| &self.edges[e.0])
            .find(|edge| edge.from == from)
            .map(|edge| edge.weight)
    }

    /// Overwrites the weight of the edge `from -> to`. Returns `false` when
    /// `from` has no such successor.
    pub fn set_outgoing_weight(&mut self, from: UnitId, to: UnitId, weight: f64) -> bool {
        let found = self.units[from.0]
            .outgoing
            .iter()
            .copied()
            .find(|&e| self.edges[e.0].to == to);
        match found {
            Some(e) => {
                self.edges[e.0].weight = weight;
                true
            }
            None => false,
        }
    }

    /// Overwrites the bias of a neuron. Returns `false` for a sensor.
    pub fn set_bias(&mut self, id: UnitId, value: f64) -> bool {
        match &mut self.units[id.0].kind {
            UnitKind::Neuron { bias, .. } => {
                *bias = value;
                true
            }
            UnitKind::Sensor => false,
        }
    }

    /// Sets the unit's value directly, bypassing activation.
    pub fn sense(&mut self, id: UnitId, x: f64) {
        self.units[id.0].value = x;
    }

    /// Recomputes a neuron's value as `f(bias + sum(weight * predecessor value))`.
    /// A sensor keeps its sensed value.
    pub fn activate(&mut self, id: UnitId) {
        let (bias, activation) = match self.units[id.0].kind {
            UnitKind::Neuron { bias, activation } => (bias, activation),
            UnitKind::Sensor => return,
        };
        let sum = self.units[id.0]
            .incoming
            .iter()
            .map(|&e| {
                let edge = &self.edges[e.0];
                self.units[edge.from.0].value * edge.weight
            })
            .fold(bias, |acc, x| acc + x);
        self.units[id.0].value = activation.function(sum);
    }

    /// Activates the unit (if it is a neuron), then propagates into every
    /// successor in edge order.
    ///
    /// A successor shared by several callers is re-activated on every call
    /// chain that reaches it, each time from the current predecessor values.
    pub fn propagate(&mut self, id: UnitId) {
        if self.units[id.0].is_neuron() {
            self.activate(id);
        }
        for k in 0..self.units[id.0].outgoing.len() {
            let successor = self.edges[self.units[id.0].outgoing[k].0].to;
            self.propagate(successor);
        }
    }

    /// Pulls error from the successors, then recurses upstream.
    ///
    /// A unit without successors keeps the error it already holds, so every
    /// output unit must be seeded with `set_expected_error` first.
    pub fn backpropagate(&mut self, id: UnitId) {
        if !self.units[id.0].outgoing.is_empty() {
            let upstream: f64 = self.units[id.0]
                .outgoing
                .iter()
                .map(|&e| {
                    let edge = &self.edges[e.0];
                    edge.weight * self.units[edge.to.0].error
                })
                .sum();
            self.set_error_from_upstream(id, upstream);
        }
        for k in 0..self.units[id.0].incoming.len() {
            let predecessor = self.edges[self.units[id.0].incoming[k].0].from;
            self.backpropagate(predecessor);
        }
    }

    /// `error = (value - expected) * f'(value)`.
    pub fn set_expected_error(&mut self, id: UnitId, expected: f64) {
        let unit = &mut self.units[id.0];
        unit.error = (unit.value - expected) * unit.derivative();
    }

    /// `error = raw * f'(value)`.
    pub fn set_error_from_upstream(&mut self, id: UnitId, raw: f64) {
        let unit = &mut self.units[id.0];
        unit.error = raw * unit.derivative();
    }

    /// Gradient step on the unit's incoming weights and bias, then recurses
    /// into every successor.
    ///
    /// Shared successors are updated once per call chain that reaches them;
    /// later visits start from the weights the earlier ones left behind.
    pub fn train_weights(&mut self, id: UnitId, rate: f64) {
        let error = self.units[id.0].error;
        for k in 0..self.units[id.0].incoming.len() {
            let e = self.units[id.0].incoming[k];
            let input = self.units[self.edges[e.0].from.0].value;
            self.edges[e.0].weight -= rate * error * input;
        }
        if let UnitKind::Neuron { bias, .. } = &mut self.units[id.0].kind {
            *bias -= rate * error;
        }
        for k in 0..self.units[id.0].outgoing.len() {
            let successor = self.edges[self.units[id.0].outgoing[k].0].to;
            self.train_weights(successor, rate);
        }
    }

    /// Diagnostic snapshot of one unit.
    pub fn report(&self, id: UnitId) -> UnitReport {
        let unit = &self.units[id.0];
        let name_of = |u: UnitId| self.units[u.0].name.clone();
        UnitReport {
            name: unit.name.clone(),
            kind: unit.kind.to_string(),
            value: unit.value,
            error: unit.error,
            bias: unit.bias(),
            receives_from: unit
                .incoming
                .iter()
                .map(|e| (name_of(self.edges[e.0].from), self.edges[e.0].weight))
                .collect(),
            sends_to: unit
                .outgoing
                .iter()
                .map(|e| (name_of(self.edges[e.0].to), self.edges[e.0].weight))
                .collect(),
        }
    }

    /// Reports for `id` and everything downstream of it, depth first, one
    /// entry per visit.
    pub fn tree(&self, id: UnitId) -> Vec<UnitReport> {
        let mut out = Vec::new();
        self.collect_tree(id, &mut out);
        out
    }

    fn collect_tree(&self, id: UnitId, out: &mut Vec<UnitReport>) {
        out.push(self.report(id));
        for e in &self.units[id.0].outgoing {
            self.collect_tree(self.edges[e.0].to, out);
        }
    }
}
