use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::sigmoid::Sigmoid;
use crate::error::{PerceptronError, Result};
use crate::loss::squared_error::SquaredErrorLoss;
use crate::math::tensor::{LayerBuffers, WeightTensor};
use crate::network::evaluation::Evaluation;
use crate::network::init::{randomize_weights, WeightRange};
use crate::network::topology::Topology;
use crate::persist::weights::read_weights;

/// A fully connected, bias-free sigmoid network.
///
/// Owns three pieces of state:
/// - `topology`   : fixed at construction
/// - `activations`: one buffer per layer, overwritten by every forward pass
/// - `weights`    : the only state worth persisting; mutated in place by training
///
/// Activations are allocated (zero-filled) by every constructor, so a network
/// is always ready for a forward pass.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    activations: LayerBuffers,
    weights: WeightTensor,
}

/// On-disk JSON form: the topology plus the row-major weight list.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    topology: Topology,
    weights: Vec<f64>,
}

impl Network {
    /// Wraps an existing weight tensor.
    ///
    /// # Errors
    /// `MalformedWeightData` if `weights` was shaped for a different topology.
    pub fn new(topology: Topology, weights: WeightTensor) -> Result<Network> {
        check_shape(&topology, &weights)?;
        let activations = LayerBuffers::zeros(topology.widths());
        Ok(Network { topology, activations, weights })
    }

    /// A network whose every weight is zero.
    pub fn zeroed(topology: Topology) -> Network {
        let weights = WeightTensor::zeros(topology.widths());
        let activations = LayerBuffers::zeros(topology.widths());
        Network { topology, activations, weights }
    }

    /// Reads every weight from a weight stream (see `persist::weights`).
    pub fn from_reader<R: Read>(topology: Topology, reader: R) -> Result<Network> {
        let weights = read_weights(reader, &topology)?;
        Network::new(topology, weights)
    }

    /// Randomizes every weight within `range`, echoing each value to `sink`.
    pub fn randomized<R, W>(
        topology: Topology,
        range: WeightRange,
        rng: &mut R,
        sink: &mut W,
    ) -> Result<Network>
    where
        R: Rng + ?Sized,
        W: Write + ?Sized,
    {
        let weights = randomize_weights(&topology, range, rng, sink)?;
        Network::new(topology, weights)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn weights(&self) -> &WeightTensor {
        &self.weights
    }

    /// Activations left behind by the most recent forward pass.
    pub fn activations(&self) -> &LayerBuffers {
        &self.activations
    }

    /// Zeroes every activation buffer.
    pub fn reset_activations(&mut self) {
        self.activations.fill(0.0);
    }

    /// Swaps in a new weight tensor; the old one is kept on error.
    pub fn replace_weights(&mut self, weights: WeightTensor) -> Result<()> {
        check_shape(&self.topology, &weights)?;
        self.weights = weights;
        Ok(())
    }

    /// Reloads every weight from a weight stream.
    ///
    /// The whole stream is parsed and counted before anything is committed,
    /// so a short or malformed stream leaves the current weights untouched.
    pub fn load_weights<R: Read>(&mut self, reader: R) -> Result<()> {
        let weights = read_weights(reader, &self.topology)?;
        self.replace_weights(weights)
    }

    /// Runs `input` through every layer.
    ///
    /// `a[0]` becomes `input`, then for every layer `n` from 1 to `L`:
    /// `a[n][j] = σ(Σ_k a[n-1][k] * w[n-1][k][j])`.
    ///
    /// The returned `ForwardPass` borrows the output layer; error scoring goes
    /// through it so it can only ever see activations from this input.
    pub fn forward(&mut self, input: &[f64]) -> Result<ForwardPass<'_>> {
        self.propagate(input, None)?;
        Ok(ForwardPass { output: self.activations.layer(self.topology.output_layer()) })
    }

    /// Forward pass that also records every pre-activation sum in `theta`.
    pub(crate) fn forward_recording(
        &mut self,
        input: &[f64],
        theta: &mut LayerBuffers,
    ) -> Result<()> {
        self.propagate(input, Some(theta))
    }

    /// Read access to the activations alongside write access to the weights,
    /// for the backward sweep.
    pub(crate) fn training_view(&mut self) -> (&LayerBuffers, &mut WeightTensor) {
        (&self.activations, &mut self.weights)
    }

    /// Forward pass plus error, copied out into an owned report.
    pub fn evaluate(&mut self, input: &[f64], target: &[f64]) -> Result<Evaluation> {
        let pass = self.forward(input)?;
        let error = pass.error(target)?;
        Ok(Evaluation {
            target: target.to_vec(),
            output: pass.output().to_vec(),
            error,
        })
    }

    fn propagate(&mut self, input: &[f64], mut theta: Option<&mut LayerBuffers>) -> Result<()> {
        let expected = self.topology.input_width();
        if input.len() != expected {
            return Err(PerceptronError::DimensionMismatch {
                what: "input",
                expected,
                got: input.len(),
            });
        }

        self.activations.layer_mut(0).copy_from_slice(input);

        for n in 1..self.topology.layer_count() {
            let (prev, current) = self.activations.adjacent_mut(n);
            for (j, node) in current.iter_mut().enumerate() {
                let sum: f64 = prev.iter()
                    .enumerate()
                    .map(|(k, &a)| a * self.weights[(n - 1, k, j)])
                    .sum();
                if let Some(theta) = theta.as_deref_mut() {
                    theta[(n, j)] = sum;
                }
                *node = Sigmoid::function(sum);
            }
        }
        Ok(())
    }

    /// Serializes topology and weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let snapshot = Snapshot {
            topology: self.topology.clone(),
            weights: self.weights.values().to_vec(),
        };
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &snapshot)?;
        Ok(())
    }

    /// Deserializes a network previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        let reader = BufReader::new(File::open(path)?);
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        let expected = snapshot.topology.weight_count();
        let got = snapshot.weights.len();
        let weights = WeightTensor::from_values(snapshot.topology.widths(), snapshot.weights)
            .ok_or_else(|| PerceptronError::MalformedWeightData(format!(
                "snapshot for {} needs {expected} weights, found {got}",
                snapshot.topology
            )))?;
        Network::new(snapshot.topology, weights)
    }
}

fn check_shape(topology: &Topology, weights: &WeightTensor) -> Result<()> {
    if weights.widths() != topology.widths() {
        return Err(PerceptronError::MalformedWeightData(format!(
            "weights are shaped for {:?}, network is {}",
            weights.widths(),
            topology
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// ForwardPass
// ---------------------------------------------------------------------------

/// Output of one `Network::forward` call.
#[derive(Debug, Clone, Copy)]
pub struct ForwardPass<'a> {
    output: &'a [f64],
}

impl<'a> ForwardPass<'a> {
    /// The output layer, `a[L]`.
    pub fn output(&self) -> &'a [f64] {
        self.output
    }

    /// `0.5 * Σ (target[i] - a[L][i])²`
    pub fn error(&self, target: &[f64]) -> Result<f64> {
        if target.len() != self.output.len() {
            return Err(PerceptronError::DimensionMismatch {
                what: "target",
                expected: self.output.len(),
                got: target.len(),
            });
        }
        Ok(SquaredErrorLoss::loss(self.output, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    #[test]
    fn zero_weights_give_half_everywhere() {
        let topology = Topology::new(3, &[4, 2, 5], 2).unwrap();
        let mut network = Network::zeroed(topology);

        for input in [[0.0, 0.0, 0.0], [9.0, -3.0, 0.25], [-100.0, 1.0, 7.0]] {
            network.forward(&input).unwrap();
            let activations = network.activations();
            for n in 1..activations.layer_count() {
                assert!(activations.layer(n).iter().all(|&a| a == 0.5), "layer {n}");
            }
            assert_eq!(activations.layer(0), &input);
        }
    }

    #[test]
    fn single_weight_scenario() {
        let topology = Topology::new(1, &[], 1).unwrap();
        let mut network = Network::zeroed(topology);

        let pass = network.forward(&[5.0]).unwrap();
        assert_eq!(pass.output(), &[0.5]);
        assert_relative_eq!(pass.error(&[1.0]).unwrap(), 0.125);
    }

    #[test]
    fn forward_matches_hand_computation() {
        // 2 inputs -> 2 hidden -> 1 output
        let topology = Topology::new(2, &[2], 1).unwrap();
        let weights = WeightTensor::from_values(
            topology.widths(),
            vec![0.5, -1.0, 0.25, 2.0, 1.5, -0.75],
        ).unwrap();
        let mut network = Network::new(topology, weights).unwrap();

        let h0 = Sigmoid::function(1.0 * 0.5 + 2.0 * 0.25);
        let h1 = Sigmoid::function(1.0 * -1.0 + 2.0 * 2.0);
        let expected = Sigmoid::function(h0 * 1.5 + h1 * -0.75);

        let output = network.forward(&[1.0, 2.0]).unwrap().output().to_vec();
        assert_relative_eq!(output[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn forward_rejects_wrong_input_width() {
        let mut network = Network::zeroed(Topology::new(2, &[], 1).unwrap());
        let result = network.forward(&[1.0]);
        assert!(matches!(
            result,
            Err(PerceptronError::DimensionMismatch { what: "input", expected: 2, got: 1 })
        ));
    }

    #[test]
    fn error_rejects_wrong_target_width() {
        let mut network = Network::zeroed(Topology::new(2, &[], 1).unwrap());
        let pass = network.forward(&[1.0, 1.0]).unwrap();
        assert!(pass.error(&[1.0, 0.0]).is_err());
    }

    #[test]
    fn evaluate_reports_output_and_error() {
        let mut network = Network::zeroed(Topology::new(2, &[3], 2).unwrap());
        let evaluation = network.evaluate(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
        assert_eq!(evaluation.output, vec![0.5, 0.5]);
        assert_relative_eq!(evaluation.error, 0.25);
    }

    #[test]
    fn short_stream_keeps_previous_weights() {
        let topology = Topology::new(2, &[], 1).unwrap();
        let mut network = Network::from_reader(topology, Cursor::new("0.5\n-0.5\n")).unwrap();

        let result = network.load_weights(Cursor::new("9.0\n"));

        assert!(matches!(result, Err(PerceptronError::MalformedWeightData(_))));
        assert_eq!(network.weights().values(), &[0.5, -0.5]);
    }

    #[test]
    fn replace_weights_checks_shape() {
        let mut network = Network::zeroed(Topology::new(2, &[2], 1).unwrap());
        let wrong = WeightTensor::zeros(&[2, 1]);
        assert!(network.replace_weights(wrong).is_err());
        assert_eq!(network.weights().values().len(), 6);
    }

    #[test]
    fn json_snapshot_round_trips() {
        let topology = Topology::new(2, &[2], 1).unwrap();
        let weights = WeightTensor::from_values(
            topology.widths(),
            vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
        ).unwrap();
        let network = Network::new(topology, weights).unwrap();

        let path = std::env::temp_dir().join("ferrite_perceptron_snapshot_test.json");
        network.save_json(&path).unwrap();
        let loaded = Network::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.topology(), network.topology());
        assert_eq!(loaded.weights(), network.weights());
    }
}
