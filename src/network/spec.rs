use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Layer sizes of a three-layer network: sensors, hidden neurons, output
/// neurons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl NetworkSpec {
    pub fn new(inputs: usize, hidden: usize, outputs: usize) -> NetworkSpec {
        NetworkSpec { inputs, hidden, outputs }
    }

    /// Rejects layers with no units.
    pub fn validate(&self) -> Result<()> {
        for (size, layer) in [
            (self.inputs, "input"),
            (self.hidden, "hidden"),
            (self.outputs, "output"),
        ] {
            if size == 0 {
                return Err(Error::EmptyLayer(layer));
            }
        }
        Ok(())
    }

    /// Number of edges in the fully connected topology.
    pub fn edge_count(&self) -> usize {
        self.inputs * self.hidden + self.hidden * self.outputs
    }
}

/// Pinned weights and biases for a network, bypassing random initialization.
///
/// Layout:
/// - `hidden_biases[h]`
/// - `hidden_weights[h][i]`: weight of `input_i -> hidden_h`
/// - `output_biases[o]`
/// - `output_weights[o][h]`: weight of `hidden_h -> output_o`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub hidden_biases: Vec<f64>,
    pub hidden_weights: Vec<Vec<f64>>,
    pub output_biases: Vec<f64>,
    pub output_weights: Vec<Vec<f64>>,
}

impl Parameters {
    /// Every weight and bias set to `value`.
    pub fn constant(spec: NetworkSpec, value: f64) -> Parameters {
        Parameters {
            hidden_biases: vec![value; spec.hidden],
            hidden_weights: vec![vec![value; spec.inputs]; spec.hidden],
            output_biases: vec![value; spec.outputs],
            output_weights: vec![vec![value; spec.hidden]; spec.outputs],
        }
    }

    /// Checks every table against the layer sizes of `spec`.
    pub fn check(&self, spec: &NetworkSpec) -> Result<()> {
        check_len("hidden biases", spec.hidden, self.hidden_biases.len())?;
        check_len("hidden weight rows", spec.hidden, self.hidden_weights.len())?;
        for row in &self.hidden_weights {
            check_len("weights per hidden unit", spec.inputs, row.len())?;
        }
        check_len("output biases", spec.outputs, self.output_biases.len())?;
        check_len("output weight rows", spec.outputs, self.output_weights.len())?;
        for row in &self.output_weights {
            check_len("weights per output unit", spec.hidden, row.len())?;
        }
        Ok(())
    }
}

fn check_len(what: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(Error::ParameterCount { what, expected, got });
    }
    Ok(())
}
