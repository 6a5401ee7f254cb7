use crate::activation::sigmoid::Sigmoid;
use crate::data::test_set::Example;
use crate::error::{PerceptronError, Result};
use crate::loss::squared_error::SquaredErrorLoss;
use crate::math::tensor::LayerBuffers;
use crate::network::network::Network;
use crate::network::topology::Topology;
use crate::optim::sgd::Sgd;

/// Scratch buffers for one backpropagation step, shaped like the activations.
///
/// - `theta[n][j]`: pre-activation sum into node `j` of layer `n`
/// - `omega[n][j]`: error signal of node `j`: `target - output` on the output
///                   layer, the back-propagated sum on every layer to its left
/// - `psi[n][j]`  : `omega[n][j] * σ'(theta[n][j])`
///
/// Everything here is overwritten by every step; nothing carries over between
/// examples.
#[derive(Debug, Clone)]
pub struct Backprop {
    topology: Topology,
    theta: LayerBuffers,
    omega: LayerBuffers,
    psi: LayerBuffers,
}

impl Backprop {
    pub fn new(topology: &Topology) -> Backprop {
        Backprop {
            topology: topology.clone(),
            theta: LayerBuffers::zeros(topology.widths()),
            omega: LayerBuffers::zeros(topology.widths()),
            psi: LayerBuffers::zeros(topology.widths()),
        }
    }

    /// Trains `network` on a single example and returns the example's error
    /// measured again with the updated weights.
    ///
    /// The sweep runs from the output layer (`alpha = L`) down to layer 1.
    /// For every source node `gamma` of layer `alpha - 1` and destination node
    /// `beta` of layer `alpha`, the error is pushed left through the weight
    /// before that weight moves:
    ///
    /// ```text
    /// omega[alpha-1][gamma] += psi[alpha][beta] * w[alpha-1][gamma][beta]
    /// w[alpha-1][gamma][beta] += λ * psi[alpha][beta] * a[alpha-1][gamma]
    /// ```
    pub fn step(&mut self, network: &mut Network, example: &Example, sgd: &Sgd) -> Result<f64> {
        if network.topology() != &self.topology {
            return Err(PerceptronError::InvalidTopology(format!(
                "backprop buffers are shaped for {}, network is {}",
                self.topology,
                network.topology()
            )));
        }
        example.check(&self.topology)?;

        network.forward_recording(&example.input, &mut self.theta)?;

        let last = self.topology.output_layer();
        let (activations, weights) = network.training_view();

        SquaredErrorLoss::error_signal(
            activations.layer(last),
            &example.target,
            self.omega.layer_mut(last),
        );

        for alpha in (1..=last).rev() {
            for ((psi, &omega), &theta) in self.psi.layer_mut(alpha).iter_mut()
                .zip(self.omega.layer(alpha))
                .zip(self.theta.layer(alpha))
            {
                *psi = omega * Sigmoid::derivative(theta);
            }

            let psi = self.psi.layer(alpha);
            let sources = activations.layer(alpha - 1);
            let omega_left = self.omega.layer_mut(alpha - 1);

            for (gamma, (omega, &source)) in omega_left.iter_mut().zip(sources).enumerate() {
                *omega = 0.0;
                for (weight, &psi) in weights.row_mut(alpha - 1, gamma).iter_mut().zip(psi) {
                    *omega += psi * *weight;
                    sgd.adjust(weight, psi, source);
                }
            }
        }

        network.forward(&example.input)?.error(&example.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tensor::WeightTensor;
    use approx::assert_relative_eq;

    #[test]
    fn single_weight_step_by_hand() {
        // [1, 1], w = 0, x = 1, t = 1:
        // theta = 0, a = 0.5, omega = 0.5, psi = 0.5 * 0.25, w' = 0.125
        let topology = Topology::new(1, &[], 1).unwrap();
        let mut network = Network::zeroed(topology.clone());
        let mut backprop = Backprop::new(&topology);

        let error = backprop
            .step(&mut network, &Example::new(vec![1.0], vec![1.0]), &Sgd::new(1.0))
            .unwrap();

        assert_relative_eq!(network.weights()[(0, 0, 0)], 0.125);
        let expected = 0.5 * (1.0 - Sigmoid::function(0.125)).powi(2);
        assert_relative_eq!(error, expected, epsilon = 1e-15);
        assert!(error < 0.125);
    }

    #[test]
    fn hidden_error_uses_weights_before_update() {
        // 1 -> 1 -> 1 with both weights 1, x = 1, t = 0.
        let topology = Topology::new(1, &[1], 1).unwrap();
        let weights = WeightTensor::from_values(topology.widths(), vec![1.0, 1.0]).unwrap();
        let mut network = Network::new(topology.clone(), weights).unwrap();
        let mut backprop = Backprop::new(&topology);
        let lambda = 0.5;

        let h = Sigmoid::function(1.0);
        let o = Sigmoid::function(h);
        let psi_out = (0.0 - o) * Sigmoid::derivative(h);
        // Back-propagated through the old output weight (1.0), not the updated one.
        let psi_hidden = psi_out * 1.0 * Sigmoid::derivative(1.0);

        backprop
            .step(&mut network, &Example::new(vec![1.0], vec![0.0]), &Sgd::new(lambda))
            .unwrap();

        assert_relative_eq!(network.weights()[(1, 0, 0)], 1.0 + lambda * psi_out * h, epsilon = 1e-15);
        assert_relative_eq!(network.weights()[(0, 0, 0)], 1.0 + lambda * psi_hidden * 1.0, epsilon = 1e-15);
    }

    #[test]
    fn repeated_steps_lower_the_error() {
        let topology = Topology::new(2, &[3], 2).unwrap();
        let weights = WeightTensor::from_values(
            topology.widths(),
            vec![0.1, -0.2, 0.3, 0.4, 0.5, -0.6, 0.7, -0.8, 0.9, 0.15, -0.25, 0.35],
        ).unwrap();
        let mut network = Network::new(topology.clone(), weights).unwrap();
        let mut backprop = Backprop::new(&topology);
        let example = Example::new(vec![1.0, 0.5], vec![0.9, 0.1]);

        let initial = network.evaluate(&example.input, &example.target).unwrap().error;
        let mut last = initial;
        for _ in 0..200 {
            last = backprop.step(&mut network, &example, &Sgd::new(1.0)).unwrap();
        }
        assert!(last < initial);
    }

    #[test]
    fn rejects_foreign_network() {
        let mut backprop = Backprop::new(&Topology::new(2, &[], 1).unwrap());
        let mut network = Network::zeroed(Topology::new(3, &[], 1).unwrap());
        let result = backprop.step(
            &mut network,
            &Example::new(vec![0.0; 3], vec![1.0]),
            &Sgd::new(1.0),
        );
        assert!(matches!(result, Err(PerceptronError::InvalidTopology(_))));
    }

    #[test]
    fn rejects_misshapen_target_without_touching_weights() {
        let topology = Topology::new(1, &[], 1).unwrap();
        let mut network = Network::zeroed(topology.clone());
        let mut backprop = Backprop::new(&topology);

        let result = backprop.step(
            &mut network,
            &Example::new(vec![1.0], vec![1.0, 0.0]),
            &Sgd::new(1.0),
        );

        assert!(result.is_err());
        assert_eq!(network.weights()[(0, 0, 0)], 0.0);
    }
}
