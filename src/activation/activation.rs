use serde::{Deserialize, Serialize};

/// Activation applied by a neuron to its weighted input sum plus bias.
///
/// The network is fixed to the logistic sigmoid; the enum keeps the function
/// a value that a neuron carries rather than a free function it calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
}

impl ActivationFunction {
    /// Element-wise activation: `1 / (1 + e^-x)`.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Derivative expressed in terms of the activation's own output `s`,
    /// i.e. `s * (1 - s)` for the sigmoid.
    pub fn derivative(&self, output: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => output * (1.0 - output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_centered_at_half() {
        let f = ActivationFunction::Sigmoid;
        assert_eq!(f.function(0.0), 0.5);
        assert!(f.function(10.0) > 0.9999);
        assert!(f.function(-10.0) < 0.0001);
    }

    #[test]
    fn derivative_uses_output_value() {
        let f = ActivationFunction::Sigmoid;
        assert_eq!(f.derivative(0.5), 0.25);
        assert_eq!(f.derivative(1.0), 0.0);
        assert_eq!(f.derivative(0.0), 0.0);
    }
}
