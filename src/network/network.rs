use log::debug;
use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::network::graph::Graph;
use crate::network::spec::{NetworkSpec, Parameters};
use crate::unit::report::UnitReport;
use crate::unit::unit::{Unit, UnitId};

/// Fully connected input -> hidden -> output perceptron over a `Graph`.
///
/// Hidden units are only reachable through the input units' outgoing edges;
/// the network keeps handles to its input and output layers.
#[derive(Debug, Clone)]
pub struct Network {
    graph: Graph,
    spec: NetworkSpec,
    inputs: Vec<UnitId>,
    outputs: Vec<UnitId>,
}

impl Network {
    /// Builds a network whose weights and biases are uniform in `[0, 1)`,
    /// drawn from the thread-local generator.
    pub fn new(inputs: usize, hidden: usize, outputs: usize) -> Result<Network> {
        Network::with_rng(inputs, hidden, outputs, &mut rand::thread_rng())
    }

    /// Same as `new`, drawing from `rng`.
    ///
    /// Draw order: per hidden unit its bias then one weight per input; then
    /// per output unit its bias then one weight per hidden unit.
    pub fn with_rng<R: Rng>(
        inputs: usize,
        hidden: usize,
        outputs: usize,
        rng: &mut R,
    ) -> Result<Network> {
        let spec = NetworkSpec::new(inputs, hidden, outputs);
        spec.validate()?;

        let mut params = Parameters {
            hidden_biases: Vec::with_capacity(hidden),
            hidden_weights: Vec::with_capacity(hidden),
            output_biases: Vec::with_capacity(outputs),
            output_weights: Vec::with_capacity(outputs),
        };
        for _ in 0..hidden {
            params.hidden_biases.push(rng.gen::<f64>());
            params.hidden_weights.push((0..inputs).map(|_| rng.gen::<f64>()).collect());
        }
        for _ in 0..outputs {
            params.output_biases.push(rng.gen::<f64>());
            params.output_weights.push((0..hidden).map(|_| rng.gen::<f64>()).collect());
        }

        Network::from_parameters(spec, &params)
    }

    /// Builds the topology with pinned weights and biases.
    pub fn from_parameters(spec: NetworkSpec, params: &Parameters) -> Result<Network> {
        spec.validate()?;
        params.check(&spec)?;

        let activation = ActivationFunction::Sigmoid;
        let mut graph = Graph::new();

        let inputs: Vec<UnitId> = (0..spec.inputs)
            .map(|i| graph.add_unit(Unit::sensor(format!("input_{}", i))))
            .collect();

        let mut hidden = Vec::with_capacity(spec.hidden);
        for (h, (&bias, weights)) in params
            .hidden_biases
            .iter()
            .zip(params.hidden_weights.iter())
            .enumerate()
        {
            let unit = graph.add_unit(Unit::neuron(format!("hidden_{}", h), activation, bias));
            for (&input, &w) in inputs.iter().zip(weights.iter()) {
                graph.connect(input, unit, w);
            }
            hidden.push(unit);
        }

        let mut outputs = Vec::with_capacity(spec.outputs);
        for (o, (&bias, weights)) in params
            .output_biases
            .iter()
            .zip(params.output_weights.iter())
            .enumerate()
        {
            let unit = graph.add_unit(Unit::neuron(format!("output_{}", o), activation, bias));
            for (&h, &w) in hidden.iter().zip(weights.iter()) {
                graph.connect(h, unit, w);
            }
            outputs.push(unit);
        }

        debug!(
            "built network {}-{}-{} with {} edges",
            spec.inputs,
            spec.hidden,
            spec.outputs,
            graph.edges().len()
        );

        Ok(Network { graph, spec, inputs, outputs })
    }

    pub fn spec(&self) -> NetworkSpec {
        self.spec
    }

    pub fn num_inputs(&self) -> usize {
        self.spec.inputs
    }

    pub fn num_hidden(&self) -> usize {
        self.spec.hidden
    }

    pub fn num_outputs(&self) -> usize {
        self.spec.outputs
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn input_units(&self) -> &[UnitId] {
        &self.inputs
    }

    pub fn output_units(&self) -> &[UnitId] {
        &self.outputs
    }

    /// Current values of the output layer.
    pub fn outputs(&self) -> Vec<f64> {
        self.outputs.iter().map(|&o| self.graph.unit(o).value()).collect()
    }

    /// One training step on a single example. Returns the sum over the output
    /// layer of `(expected - actual)^2`, measured before the update.
    ///
    /// Nothing is touched if `inputs` has the wrong length or `target_class`
    /// does not name an output unit.
    pub fn train(&mut self, rate: f64, inputs: &[f64], target_class: usize) -> Result<f64> {
        self.check_inputs(inputs)?;
        if target_class >= self.outputs.len() {
            return Err(Error::ClassOutOfRange {
                class: target_class,
                outputs: self.outputs.len(),
            });
        }

        self.forward(inputs);

        let mut sum_error = 0.0;
        for (k, &o) in self.outputs.iter().enumerate() {
            let expected = if k == target_class { 1.0 } else { 0.0 };
            sum_error += (expected - self.graph.unit(o).value()).powi(2);
            self.graph.set_expected_error(o, expected);
        }

        // Seeded from the outputs: the upstream recursion reaches every
        // hidden and input unit from there.
        for &o in &self.outputs {
            self.graph.backpropagate(o);
        }

        for &i in &self.inputs {
            self.graph.train_weights(i, rate);
        }

        Ok(sum_error)
    }

    /// Forward pass only; index of the output unit with the greatest value.
    /// Ties go to the lowest index.
    pub fn predict(&mut self, inputs: &[f64]) -> Result<usize> {
        self.check_inputs(inputs)?;
        self.forward(inputs);
        Ok(arg_max(&self.outputs()))
    }

    /// Reports for every unit reached by a downstream walk from each input
    /// unit, in visit order. Shared units appear once per path.
    pub fn tree(&self) -> Vec<UnitReport> {
        self.inputs.iter().flat_map(|&i| self.graph.tree(i)).collect()
    }

    /// Writes `tree()` to the log at debug level.
    pub fn log_tree(&self) {
        for report in self.tree() {
            debug!("============\n{}============", report);
        }
    }

    fn check_inputs(&self, inputs: &[f64]) -> Result<()> {
        if inputs.len() != self.inputs.len() {
            return Err(Error::InputSize {
                expected: self.inputs.len(),
                got: inputs.len(),
            });
        }
        Ok(())
    }

    /// Senses every input, then propagates from each input unit in order.
    fn forward(&mut self, inputs: &[f64]) {
        for (&unit, &x) in self.inputs.iter().zip(inputs.iter()) {
            self.graph.sense(unit, x);
        }
        for k in 0..self.inputs.len() {
            self.graph.propagate(self.inputs[k]);
        }
    }
}

/// Index of the first strictly greatest value.
fn arg_max(values: &[f64]) -> usize {
    let mut max = f64::NEG_INFINITY;
    let mut pos = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > max {
            max = v;
            pos = i;
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-12;

    fn sigmoid(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }

    #[test]
    fn arg_max_keeps_first_maximum() {
        assert_eq!(arg_max(&[0.2, 0.7, 0.7, 0.1]), 1);
        assert_eq!(arg_max(&[0.9]), 0);
        assert_eq!(arg_max(&[0.5, 0.5]), 0);
    }

    #[test]
    fn construction_wires_full_topology() {
        let net = Network::new(3, 4, 2).unwrap();
        assert_eq!(net.graph().len(), 3 + 4 + 2);
        assert_eq!(net.graph().edges().len(), 3 * 4 + 4 * 2);
        for &i in net.input_units() {
            assert_eq!(net.graph().unit(i).outgoing().len(), 4);
            assert!(net.graph().unit(i).incoming().is_empty());
        }
        for &o in net.output_units() {
            assert_eq!(net.graph().unit(o).incoming().len(), 4);
            assert!(net.graph().unit(o).outgoing().is_empty());
        }
    }

    #[test]
    fn random_parameters_are_unit_interval() {
        let net = Network::with_rng(4, 3, 2, &mut StdRng::seed_from_u64(7)).unwrap();
        for edge in net.graph().edges() {
            assert!((0.0..1.0).contains(&edge.weight()));
        }
        for (_, unit) in net.graph().units() {
            if let Some(b) = unit.bias() {
                assert!((0.0..1.0).contains(&b));
            }
        }
    }

    #[test]
    fn same_seed_builds_same_network() {
        let a = Network::with_rng(2, 2, 2, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Network::with_rng(2, 2, 2, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.graph().edges(), b.graph().edges());
    }

    #[test]
    fn empty_layer_is_rejected() {
        assert!(matches!(Network::new(0, 2, 2), Err(Error::EmptyLayer("input"))));
        assert!(matches!(Network::new(2, 2, 0), Err(Error::EmptyLayer("output"))));
    }

    #[test]
    fn forward_pass_matches_hand_computation() {
        // 1 input, 1 hidden, 1 output: the chain is visited once, so a single
        // pass gives the textbook values.
        let spec = NetworkSpec::new(1, 1, 1);
        let params = Parameters {
            hidden_biases: vec![0.1],
            hidden_weights: vec![vec![0.4]],
            output_biases: vec![-0.2],
            output_weights: vec![vec![0.8]],
        };
        let mut net = Network::from_parameters(spec, &params).unwrap();
        net.predict(&[0.5]).unwrap();
        let h = sigmoid(0.1 + 0.4 * 0.5);
        let o = sigmoid(-0.2 + 0.8 * h);
        assert!((net.outputs()[0] - o).abs() < EPS);
    }

    #[test]
    fn train_step_matches_hand_computation() {
        let spec = NetworkSpec::new(1, 1, 2);
        let params = Parameters {
            hidden_biases: vec![0.1],
            hidden_weights: vec![vec![0.4]],
            output_biases: vec![-0.2, 0.3],
            output_weights: vec![vec![0.8], vec![0.6]],
        };
        let mut net = Network::from_parameters(spec, &params).unwrap();
        let x = 0.5;
        let rate = 0.5;

        let h = sigmoid(0.1 + 0.4 * x);
        let o0 = sigmoid(-0.2 + 0.8 * h);
        let o1 = sigmoid(0.3 + 0.6 * h);
        let e0 = (o0 - 1.0) * o0 * (1.0 - o0);
        let e1 = (o1 - 0.0) * o1 * (1.0 - o1);
        let eh = (0.8 * e0 + 0.6 * e1) * h * (1.0 - h);

        let sum_error = net.train(rate, &[x], 0).unwrap();
        assert!((sum_error - ((1.0 - o0).powi(2) + o1.powi(2))).abs() < EPS);

        let g = net.graph();
        let [input] = net.input_units() else { unreachable!() };
        let hidden = g.edge(g.unit(*input).outgoing()[0]).target();
        let (out0, out1) = (net.output_units()[0], net.output_units()[1]);

        assert!((g.outgoing_weight(*input, hidden).unwrap() - (0.4 - rate * eh * x)).abs() < EPS);
        assert!((g.unit(hidden).bias().unwrap() - (0.1 - rate * eh)).abs() < EPS);
        assert!((g.outgoing_weight(hidden, out0).unwrap() - (0.8 - rate * e0 * h)).abs() < EPS);
        assert!((g.outgoing_weight(hidden, out1).unwrap() - (0.6 - rate * e1 * h)).abs() < EPS);
        assert!((g.unit(out0).bias().unwrap() - (-0.2 - rate * e0)).abs() < EPS);
        assert!((g.unit(out1).bias().unwrap() - (0.3 - rate * e1)).abs() < EPS);
    }

    #[test]
    fn output_weights_step_once_per_input_and_hidden_path() {
        // 2 inputs, 1 hidden, 1 output: the output is reached from both
        // inputs, so its bias takes two identical steps.
        let spec = NetworkSpec::new(2, 1, 1);
        let mut net = Network::from_parameters(spec, &Parameters::constant(spec, 0.0)).unwrap();
        net.train(1.0, &[0.0, 0.0], 0).unwrap();
        // hidden = 0.5, output = sigmoid(0) = 0.5, error = -0.5 * 0.25
        let out = net.output_units()[0];
        assert!((net.graph().unit(out).bias().unwrap() - 0.25).abs() < EPS);
    }

    #[test]
    fn malformed_calls_fail_without_side_effects() {
        let mut net = Network::with_rng(2, 2, 2, &mut StdRng::seed_from_u64(1)).unwrap();
        let before = net.graph().edges().to_vec();
        assert!(matches!(
            net.train(0.1, &[1.0], 0),
            Err(Error::InputSize { expected: 2, got: 1 })
        ));
        assert!(matches!(
            net.train(0.1, &[1.0, 2.0], 2),
            Err(Error::ClassOutOfRange { class: 2, outputs: 2 })
        ));
        assert!(matches!(net.predict(&[1.0, 2.0, 3.0]), Err(Error::InputSize { .. })));
        assert_eq!(net.graph().edges(), &before[..]);
    }

    #[test]
    fn tree_visits_shared_units_per_path() {
        let net = Network::new(2, 2, 1).unwrap();
        // per input: itself, 2 hidden, each hidden reaches the output
        assert_eq!(net.tree().len(), 2 * (1 + 2 * 2));
        assert_eq!(net.tree()[0].name, "input_0");
        assert_eq!(net.tree()[1].name, "hidden_0");
        assert_eq!(net.tree()[2].name, "output_0");
    }
}
