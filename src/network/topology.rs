use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PerceptronError, Result};
use crate::math::tensor::WeightTensor;

/// Node count of every layer, input first and output last.
///
/// A topology always has at least an input and an output layer and every
/// layer holds at least one node. It cannot be changed once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology {
    widths: Vec<usize>,
}

impl Topology {
    /// Builds `[input, hidden..., output]`.
    ///
    /// # Errors
    /// `InvalidTopology` if any width is zero.
    pub fn new(input: usize, hidden: &[usize], output: usize) -> Result<Topology> {
        let mut widths = Vec::with_capacity(hidden.len() + 2);
        widths.push(input);
        widths.extend_from_slice(hidden);
        widths.push(output);
        Topology::from_widths(widths)
    }

    /// Builds a topology from a full width list (input through output).
    pub fn from_widths(widths: Vec<usize>) -> Result<Topology> {
        if widths.len() < 2 {
            return Err(PerceptronError::InvalidTopology(format!(
                "need at least an input and an output layer, got {} layer(s)",
                widths.len()
            )));
        }
        if let Some(layer) = widths.iter().position(|&w| w == 0) {
            return Err(PerceptronError::InvalidTopology(format!(
                "layer {layer} has no nodes"
            )));
        }
        Ok(Topology { widths })
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Total number of activation layers, `L + 1`.
    pub fn layer_count(&self) -> usize {
        self.widths.len()
    }

    /// Index `L` of the output layer.
    pub fn output_layer(&self) -> usize {
        self.widths.len() - 1
    }

    pub fn input_width(&self) -> usize {
        self.widths[0]
    }

    pub fn output_width(&self) -> usize {
        self.widths[self.output_layer()]
    }

    pub fn hidden_widths(&self) -> &[usize] {
        &self.widths[1..self.output_layer()]
    }

    /// Number of weight slots between all adjacent layers.
    pub fn weight_count(&self) -> usize {
        WeightTensor::slot_count(&self.widths)
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = PerceptronError;

    fn try_from(widths: Vec<usize>) -> Result<Topology> {
        Topology::from_widths(widths)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(topology: Topology) -> Vec<usize> {
        topology.widths
    }
}

/// Formats as `2-2-1`.
impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.widths.iter().map(|w| w.to_string()).collect();
        write!(f, "{}", parts.join("-"))
    }
}
