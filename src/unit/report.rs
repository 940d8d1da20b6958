use std::fmt;

use serde::Serialize;

/// Snapshot of one unit and its connections, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitReport {
    pub name: String,
    pub kind: String,
    pub value: f64,
    pub error: f64,
    pub bias: Option<f64>,
    /// `(predecessor name, weight)` in edge order.
    pub receives_from: Vec<(String, f64)>,
    /// `(successor name, weight)` in edge order.
    pub sends_to: Vec<(String, f64)>,
}

impl fmt::Display for UnitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {} ({})", self.name, self.kind)?;
        writeln!(f, "Value: {:.6}", self.value)?;
        writeln!(f, "Error: {:.6}", self.error)?;
        if let Some(bias) = self.bias {
            writeln!(f, "Bias: {:.6}", bias)?;
        }
        for (name, weight) in &self.receives_from {
            writeln!(f, "Receives from {} (w: {:.6})", name, weight)?;
        }
        for (name, weight) in &self.sends_to {
            writeln!(f, "Sends to {} (w: {:.6})", name, weight)?;
        }
        Ok(())
    }
}
