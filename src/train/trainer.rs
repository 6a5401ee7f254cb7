use std::time::Instant;

use crate::data::test_set::TestSet;
use crate::error::{PerceptronError, Result};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::backprop::Backprop;
use crate::train::epoch_stats::EpochStats;
use crate::train::report::TrainReport;
use crate::train::train_config::TrainConfig;

/// Epochs between `debug!` progress lines.
const PROGRESS_INTERVAL: usize = 1000;

/// Runs online gradient descent over a fixed test set.
///
/// Each epoch steps through the examples in order and updates the weights
/// after every single example, so later examples in an epoch train against
/// weights already moved by the earlier ones.
pub struct Trainer {
    config: TrainConfig,
    test_set: TestSet,
    backprop: Backprop,
    sgd: Sgd,
    /// Post-update error of every example from the latest epoch.
    errors: Vec<f64>,
    epochs: usize,
}

impl Trainer {
    /// # Errors
    /// - `InvalidConfig` / `InvalidRange` if `config` does not validate, or the
    ///   test set is empty
    /// - `DimensionMismatch` if an example does not fit `network`
    pub fn new(config: TrainConfig, test_set: TestSet, network: &Network) -> Result<Trainer> {
        config.validate()?;
        if test_set.is_empty() {
            return Err(PerceptronError::InvalidConfig("the test set is empty".into()));
        }
        for example in &test_set {
            example.check(network.topology())?;
        }

        let errors = vec![f64::INFINITY; test_set.len()];
        Ok(Trainer {
            sgd: Sgd::new(config.learning_rate),
            backprop: Backprop::new(network.topology()),
            config,
            test_set,
            errors,
            epochs: 0,
        })
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn test_set(&self) -> &TestSet {
        &self.test_set
    }

    /// Epochs run so far by this trainer, across every `train` call.
    pub fn epochs_run(&self) -> usize {
        self.epochs
    }

    /// Post-update errors recorded during the latest epoch.
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// True once every error from the latest epoch is within the threshold.
    pub fn is_converged(&self) -> bool {
        self.epochs > 0 && self.errors.iter().all(|e| e.abs() <= self.config.error_threshold)
    }

    /// One gradient step per example, in test-set order.
    ///
    /// Callers that need a wall-clock limit can drive training through this
    /// method and simply stop calling it.
    pub fn run_epoch(&mut self, network: &mut Network) -> Result<EpochStats> {
        let t_start = Instant::now();
        let threshold = self.config.error_threshold;

        // Any one example reaching the threshold only means it is worth
        // checking the whole set afterwards.
        let mut any_reached = false;
        for (error, example) in self.errors.iter_mut().zip(self.test_set.iter()) {
            *error = self.backprop.step(network, example, &self.sgd)?;
            any_reached |= *error <= threshold;
        }
        self.epochs += 1;

        let converged = any_reached && self.is_converged();
        let max_error = self.errors.iter().cloned().fold(0.0, f64::max);
        let mean_error = self.errors.iter().sum::<f64>() / self.errors.len() as f64;

        Ok(EpochStats {
            epoch: self.epochs,
            max_error,
            mean_error,
            converged,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        })
    }

    /// Runs epochs until every example converges or `max_iterations` epochs
    /// have run, whichever comes first. Hitting the ceiling is not an error.
    ///
    /// The report evaluates every example against the final weights.
    pub fn train(&mut self, network: &mut Network) -> Result<TrainReport> {
        let t_start = Instant::now();
        log::info!(
            "training {} on {} example(s): max {} iterations, threshold {}, λ = {}",
            network.topology(),
            self.test_set.len(),
            self.config.max_iterations,
            self.config.error_threshold,
            self.config.learning_rate
        );

        let mut iterations = 0;
        let mut converged = false;
        while !converged && iterations < self.config.max_iterations {
            let stats = self.run_epoch(network)?;
            iterations += 1;
            converged = stats.converged;

            log::trace!("{stats:?}");
            if iterations % PROGRESS_INTERVAL == 0 {
                log::debug!(
                    "iteration {iterations}: max error = {:.6}, mean error = {:.6}",
                    stats.max_error, stats.mean_error
                );
            }
        }

        let examples = self.test_set.iter()
            .map(|example| network.evaluate(&example.input, &example.target))
            .collect::<Result<Vec<_>>>()?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if converged {
            log::info!("converged after {iterations} iteration(s) in {elapsed_ms} ms");
        } else {
            log::info!("stopped at the {iterations}-iteration limit without converging");
        }

        Ok(TrainReport {
            config: self.config.clone(),
            topology: network.topology().clone(),
            iterations,
            converged,
            elapsed_ms,
            examples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_set::Example;
    use crate::math::tensor::WeightTensor;
    use crate::network::init::WeightRange;
    use crate::network::topology::Topology;

    fn xor(topology: &Topology) -> TestSet {
        TestSet::from_rows(
            topology,
            &[vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
            &[vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
        ).unwrap()
    }

    fn config(max_iterations: usize) -> TrainConfig {
        TrainConfig::new(max_iterations, 0.01, 1.0, WeightRange::new(-1.5, 1.5).unwrap())
    }

    #[test]
    fn stops_at_the_iteration_ceiling() {
        // Symmetric zero weights keep both hidden nodes identical, so XOR
        // cannot be learned in a handful of epochs.
        let topology = Topology::new(2, &[2], 1).unwrap();
        let mut network = Network::zeroed(topology.clone());
        let mut trainer = Trainer::new(config(25), xor(&topology), &network).unwrap();

        let report = trainer.train(&mut network).unwrap();

        assert_eq!(report.iterations, 25);
        assert!(!report.converged);
        assert_eq!(trainer.epochs_run(), 25);
        assert_eq!(report.examples.len(), 4);
    }

    #[test]
    fn converges_on_a_single_example() {
        let topology = Topology::new(1, &[], 1).unwrap();
        let mut network = Network::zeroed(topology.clone());
        let set = TestSet::new(&topology, vec![Example::new(vec![1.0], vec![0.8])]).unwrap();
        let initial = network.evaluate(&[1.0], &[0.8]).unwrap().error;

        let mut trainer = Trainer::new(config(10_000), set, &network).unwrap();
        let report = trainer.train(&mut network).unwrap();

        assert!(report.converged);
        assert!(report.iterations < 10_000);
        assert!(report.examples[0].error <= 0.01);
        assert!(report.examples[0].error < initial);
        assert!(trainer.is_converged());
    }

    #[test]
    fn error_falls_epoch_over_epoch_on_one_example() {
        let topology = Topology::new(2, &[2], 1).unwrap();
        let weights = WeightTensor::from_values(
            topology.widths(), vec![0.3, -0.2, 0.1, 0.4, -0.5, 0.6],
        ).unwrap();
        let mut network = Network::new(topology.clone(), weights).unwrap();
        let set = TestSet::new(&topology, vec![Example::new(vec![1.0, 1.0], vec![0.95])]).unwrap();
        let mut trainer = Trainer::new(config(1), set, &network).unwrap();

        let mut previous = network.evaluate(&[1.0, 1.0], &[0.95]).unwrap().error;
        for _ in 0..50 {
            let stats = trainer.run_epoch(&mut network).unwrap();
            assert!(stats.max_error < previous);
            previous = stats.max_error;
        }
    }

    #[test]
    fn one_converged_example_is_not_enough() {
        let topology = Topology::new(1, &[], 1).unwrap();
        let mut network = Network::zeroed(topology.clone());
        // The first example already sits within the threshold at 0.5; the
        // second is far away.
        let set = TestSet::new(&topology, vec![
            Example::new(vec![0.0], vec![0.5]),
            Example::new(vec![1.0], vec![1.0]),
        ]).unwrap();
        let mut trainer = Trainer::new(config(1), set, &network).unwrap();

        let stats = trainer.run_epoch(&mut network).unwrap();

        assert!(stats.max_error > 0.01);
        assert!(!stats.converged);
        assert!(!trainer.is_converged());
    }

    #[test]
    fn rejects_empty_test_set_and_bad_config() {
        let topology = Topology::new(1, &[], 1).unwrap();
        let network = Network::zeroed(topology.clone());
        let empty = TestSet::new(&topology, Vec::new()).unwrap();
        assert!(matches!(
            Trainer::new(config(10), empty, &network),
            Err(PerceptronError::InvalidConfig(_))
        ));

        let set = TestSet::new(&topology, vec![Example::new(vec![1.0], vec![1.0])]).unwrap();
        assert!(Trainer::new(config(0), set, &network).is_err());
    }

    #[test]
    fn rejects_examples_for_another_topology() {
        let small = Topology::new(1, &[], 1).unwrap();
        let network = Network::zeroed(Topology::new(2, &[], 1).unwrap());
        let set = TestSet::new(&small, vec![Example::new(vec![1.0], vec![1.0])]).unwrap();
        assert!(matches!(
            Trainer::new(config(10), set, &network),
            Err(PerceptronError::DimensionMismatch { .. })
        ));
    }
}
