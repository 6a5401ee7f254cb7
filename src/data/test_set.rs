use serde::{Deserialize, Serialize};

use crate::error::{PerceptronError, Result};
use crate::network::topology::Topology;

/// One labeled input: the values fed to the input layer and the values the
/// output layer should produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Example {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Example {
        Example { input, target }
    }

    /// `DimensionMismatch` unless both vectors fit `topology`.
    pub fn check(&self, topology: &Topology) -> Result<()> {
        if self.input.len() != topology.input_width() {
            return Err(PerceptronError::DimensionMismatch {
                what: "input",
                expected: topology.input_width(),
                got: self.input.len(),
            });
        }
        if self.target.len() != topology.output_width() {
            return Err(PerceptronError::DimensionMismatch {
                what: "target",
                expected: topology.output_width(),
                got: self.target.len(),
            });
        }
        Ok(())
    }
}

/// Ordered labeled examples, all shaped for the same topology.
///
/// Loaded once and read-only afterwards; training walks it in order.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSet {
    examples: Vec<Example>,
}

impl TestSet {
    pub fn new(topology: &Topology, examples: Vec<Example>) -> Result<TestSet> {
        for example in &examples {
            example.check(topology)?;
        }
        Ok(TestSet { examples })
    }

    /// Pairs `inputs[i]` with `targets[i]`.
    pub fn from_rows(
        topology: &Topology,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
    ) -> Result<TestSet> {
        if inputs.len() != targets.len() {
            return Err(PerceptronError::DimensionMismatch {
                what: "target row",
                expected: inputs.len(),
                got: targets.len(),
            });
        }
        let examples = inputs.iter().zip(targets.iter())
            .map(|(input, target)| Example::new(input.clone(), target.clone()))
            .collect();
        TestSet::new(topology, examples)
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Example> {
        self.examples.iter()
    }
}

impl<'a> IntoIterator for &'a TestSet {
    type Item = &'a Example;
    type IntoIter = std::slice::Iter<'a, Example>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_rows() {
        let topology = Topology::new(2, &[3], 1).unwrap();
        let set = TestSet::from_rows(
            &topology,
            &[vec![0.0, 1.0], vec![1.0, 1.0]],
            &[vec![1.0], vec![0.0]],
        ).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.examples()[1].target, vec![0.0]);
    }

    #[test]
    fn rejects_misshapen_rows() {
        let topology = Topology::new(2, &[], 1).unwrap();
        let short_input = TestSet::from_rows(&topology, &[vec![0.0]], &[vec![1.0]]);
        let long_target = TestSet::from_rows(&topology, &[vec![0.0, 0.0]], &[vec![1.0, 1.0]]);
        let unpaired = TestSet::from_rows(&topology, &[vec![0.0, 0.0]], &[]);

        assert!(matches!(short_input, Err(PerceptronError::DimensionMismatch { what: "input", .. })));
        assert!(matches!(long_target, Err(PerceptronError::DimensionMismatch { what: "target", .. })));
        assert!(matches!(unpaired, Err(PerceptronError::DimensionMismatch { .. })));
    }
}
