use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PerceptronError, Result};
use crate::network::init::WeightRange;
use crate::train::train_config::TrainConfig;

const FIELDS: [&str; 7] = [
    "max iterations",
    "weights file",
    "test-set size",
    "error threshold",
    "learning rate",
    "weight lower bound",
    "weight upper bound",
];

/// Reads a hyperparameter descriptor, one item per line:
///
/// ```text
/// <max iterations>
/// <weights file name>
/// <test-set size>
/// <error threshold>
/// <learning rate>
/// <weight lower bound>
/// <weight upper bound>
/// ```
///
/// Blank lines are skipped and anything past the seventh item is ignored.
/// The result is validated before it is returned.
pub fn read_hyperparams<R: BufRead>(reader: R) -> Result<TrainConfig> {
    let mut lines = Vec::with_capacity(FIELDS.len());
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        lines.push(line.to_string());
        if lines.len() == FIELDS.len() {
            break;
        }
    }

    if lines.len() < FIELDS.len() {
        return Err(PerceptronError::MalformedDescriptor(format!(
            "hyperparameter descriptor ended before the {}",
            FIELDS[lines.len()]
        )));
    }

    let config = TrainConfig {
        max_iterations: field(&lines, 0)?,
        weights_file: PathBuf::from(&lines[1]),
        test_set_size: Some(field(&lines, 2)?),
        error_threshold: field(&lines, 3)?,
        learning_rate: field(&lines, 4)?,
        weight_range: WeightRange {
            low: field(&lines, 5)?,
            high: field(&lines, 6)?,
        },
    };
    config.validate()?;
    Ok(config)
}

pub fn load_hyperparams_file(path: impl AsRef<Path>) -> Result<TrainConfig> {
    let file = File::open(path)?;
    read_hyperparams(BufReader::new(file))
}

fn field<T: FromStr>(lines: &[String], index: usize) -> Result<T> {
    lines[index].parse::<T>().map_err(|_| PerceptronError::MalformedDescriptor(format!(
        "{} `{}` could not be parsed",
        FIELDS[index], lines[index]
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_every_field_in_order() {
        let text = "100000\ntrained.txt\n4\n0.01\n1.0\n-1.5\n1.5\n";
        let config = read_hyperparams(Cursor::new(text)).unwrap();

        assert_eq!(config.max_iterations, 100_000);
        assert_eq!(config.weights_file, PathBuf::from("trained.txt"));
        assert_eq!(config.test_set_size, Some(4));
        assert_eq!(config.error_threshold, 0.01);
        assert_eq!(config.learning_rate, 1.0);
        assert_eq!(config.weight_range, WeightRange { low: -1.5, high: 1.5 });
    }

    #[test]
    fn missing_field_is_malformed() {
        let result = read_hyperparams(Cursor::new("10\nw.txt\n4\n0.01\n"));
        assert!(matches!(result, Err(PerceptronError::MalformedDescriptor(_))));
    }

    #[test]
    fn unparseable_field_is_malformed() {
        let result = read_hyperparams(Cursor::new("ten\nw.txt\n4\n0.01\n1\n-1\n1\n"));
        assert!(matches!(result, Err(PerceptronError::MalformedDescriptor(_))));
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        let result = read_hyperparams(Cursor::new("10\nw.txt\n4\n0.01\n1\n1\n-1\n"));
        assert!(matches!(result, Err(PerceptronError::InvalidRange { .. })));
    }

    #[test]
    fn range_too_wide_to_sample_is_rejected() {
        let result = read_hyperparams(Cursor::new("10\nw.txt\n4\n0.01\n1.0\n-1e308\n1e308\n"));
        assert!(matches!(result, Err(PerceptronError::InvalidRange { .. })));
    }
}
