use std::fmt;

use serde::{Deserialize, Serialize};

/// The network's answer for one labeled example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub target: Vec<f64>,
    pub output: Vec<f64>,
    pub error: f64,
}

/// One `T value: … output[i]: …` line per output node, then the error.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (t, a)) in self.target.iter().zip(self.output.iter()).enumerate() {
            writeln!(f, "T value: {t} output[{i}]: {a}")?;
        }
        write!(f, "Error value: {}", self.error)
    }
}
