use std::io::Write;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{PerceptronError, Result};
use crate::math::tensor::WeightTensor;
use crate::network::topology::Topology;
use crate::persist::weights::write_weight;

/// Bounds for randomized starting weights, sampled from `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub low: f64,
    pub high: f64,
}

impl WeightRange {
    pub fn new(low: f64, high: f64) -> Result<WeightRange> {
        let range = WeightRange { low, high };
        range.validate()?;
        Ok(range)
    }

    /// `InvalidRange` when the bounds are reversed or not finite, or when the
    /// width `high - low` does not fit in an `f64`.
    pub fn validate(&self) -> Result<()> {
        if self.low.is_finite()
            && self.high.is_finite()
            && self.low <= self.high
            && (self.high - self.low).is_finite()
        {
            Ok(())
        } else {
            Err(PerceptronError::InvalidRange { low: self.low, high: self.high })
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        // An empty interval collapses to its single point.
        if self.low == self.high {
            self.low
        } else {
            rng.gen_range(self.low..self.high)
        }
    }
}

/// Draws every weight of `topology` uniformly from `range`.
///
/// Each value is written to `sink` in row-major `(n, k, j)` order the moment
/// it is drawn, so the starting weights are on record before any training
/// happens and can be reloaded with `persist::weights::read_weights`.
///
/// # Errors
/// `InvalidRange` for reversed bounds (nothing is drawn or written), `Io` if
/// the sink fails.
pub fn randomize_weights<R, W>(
    topology: &Topology,
    range: WeightRange,
    rng: &mut R,
    sink: &mut W,
) -> Result<WeightTensor>
where
    R: Rng + ?Sized,
    W: Write + ?Sized,
{
    range.validate()?;

    let mut weights = WeightTensor::zeros(topology.widths());
    for n in 0..weights.layer_count() {
        for k in 0..topology.widths()[n] {
            for weight in weights.row_mut(n, k) {
                *weight = range.sample(rng);
                write_weight(sink, *weight)?;
            }
        }
    }
    sink.flush()?;

    log::debug!(
        "randomized {} weights for {} in [{}, {})",
        topology.weight_count(), topology, range.low, range.high
    );
    Ok(weights)
}
