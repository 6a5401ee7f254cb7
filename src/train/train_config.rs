use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PerceptronError, Result};
use crate::network::init::WeightRange;

/// Hyperparameters for one training run.
///
/// # Fields
/// - `max_iterations` : epoch ceiling; training stops here even if unconverged
/// - `weights_file`   : where the starting and the final weights are written
/// - `test_set_size`  : number of examples the example file must hold, when known
/// - `error_threshold`: every example's error must reach this to converge
/// - `learning_rate`  : λ, the step multiplier for every weight update
/// - `weight_range`   : bounds for the randomized starting weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub max_iterations: usize,
    pub weights_file: PathBuf,
    #[serde(default)]
    pub test_set_size: Option<usize>,
    pub error_threshold: f64,
    pub learning_rate: f64,
    pub weight_range: WeightRange,
}

impl TrainConfig {
    /// Creates a config writing to `weights.txt` with no fixed test-set size.
    pub fn new(
        max_iterations: usize,
        error_threshold: f64,
        learning_rate: f64,
        weight_range: WeightRange,
    ) -> Self {
        TrainConfig {
            max_iterations,
            weights_file: PathBuf::from("weights.txt"),
            test_set_size: None,
            error_threshold,
            learning_rate,
            weight_range,
        }
    }

    pub fn with_weights_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.weights_file = path.into();
        self
    }

    pub fn with_test_set_size(mut self, size: usize) -> Self {
        self.test_set_size = Some(size);
        self
    }

    /// Checks every field a training run relies on.
    ///
    /// The learning rate only has to be finite; its sign is not restricted.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(PerceptronError::InvalidConfig(
                "max_iterations must be at least 1".into()
            ));
        }
        if !(self.error_threshold >= 0.0) || !self.error_threshold.is_finite() {
            return Err(PerceptronError::InvalidConfig(format!(
                "error_threshold must be a finite non-negative number, got {}",
                self.error_threshold
            )));
        }
        if !self.learning_rate.is_finite() {
            return Err(PerceptronError::InvalidConfig(format!(
                "learning_rate must be finite, got {}",
                self.learning_rate
            )));
        }
        self.weight_range.validate()
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a config written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainConfig> {
        let reader = BufReader::new(File::open(path)?);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TrainConfig {
        TrainConfig::new(1000, 0.01, 1.0, WeightRange::new(-1.0, 1.0).unwrap())
    }

    #[test]
    fn defaults() {
        let config = config();
        assert_eq!(config.weights_file, PathBuf::from("weights.txt"));
        assert_eq!(config.test_set_size, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_fields() {
        let mut zero_iterations = config();
        zero_iterations.max_iterations = 0;
        assert!(matches!(zero_iterations.validate(), Err(PerceptronError::InvalidConfig(_))));

        let mut negative_threshold = config();
        negative_threshold.error_threshold = -0.1;
        assert!(negative_threshold.validate().is_err());

        let mut nan_rate = config();
        nan_rate.learning_rate = f64::NAN;
        assert!(nan_rate.validate().is_err());

        let mut reversed = config();
        reversed.weight_range = WeightRange { low: 2.0, high: 1.0 };
        assert!(matches!(reversed.validate(), Err(PerceptronError::InvalidRange { .. })));
    }

    #[test]
    fn negative_learning_rate_is_allowed() {
        let mut config = config();
        config.learning_rate = -0.5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_round_trip() {
        let config = config().with_weights_file("out.txt").with_test_set_size(4);
        let path = std::env::temp_dir().join("ferrite_perceptron_config_test.json");
        config.save_json(&path).unwrap();
        let loaded = TrainConfig::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
