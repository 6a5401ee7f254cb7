use std::fmt;

use serde::Serialize;

use crate::network::evaluation::Evaluation;
use crate::network::topology::Topology;
use crate::train::train_config::TrainConfig;

/// Summary of a finished training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainReport {
    pub config: TrainConfig,
    pub topology: Topology,
    /// Epochs actually run.
    pub iterations: usize,
    pub converged: bool,
    pub elapsed_ms: u64,
    /// Every example evaluated with the final weights, in test-set order.
    pub examples: Vec<Evaluation>,
}

impl fmt::Display for TrainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = &self.config.weight_range;
        writeln!(f, "------RESULTS BELOW------")?;
        writeln!(f, "Maximum number of iterations allowed: {}", self.config.max_iterations)?;
        writeln!(f, "Error threshold: {}", self.config.error_threshold)?;
        writeln!(f, "Learning factor: {}", self.config.learning_rate)?;
        writeln!(f, "Weights are randomized in the range from {} to {}", range.low, range.high)?;
        writeln!(f, "Iterations used: {}", self.iterations)?;
        writeln!(
            f,
            "{}",
            if self.converged { "Converged: every error is within the threshold" }
            else { "Stopped at the iteration limit without converging" }
        )?;
        for (i, evaluation) in self.examples.iter().enumerate() {
            writeln!(f, "-----For test set #{}", i + 1)?;
            writeln!(f, "{evaluation}")?;
        }
        for (n, width) in self.topology.widths().iter().enumerate() {
            writeln!(f, "There are {width} activations in layer {}", n + 1)?;
        }
        write!(f, "Training took {} milliseconds", self.elapsed_ms)
    }
}
