pub struct SquaredErrorLoss;

impl SquaredErrorLoss {
    /// Half the summed squared error: `0.5 * Σ (expected - predicted)²`
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        0.5 * predicted.iter().zip(expected.iter())
            .map(|(a, t)| (t - a).powi(2))
            .sum::<f64>()
    }

    /// Output-layer error signal, `expected - predicted`, written into `out`.
    ///
    /// This is the negative gradient of `loss`, so adding a positive multiple
    /// of it to the weights descends the error surface.
    pub fn error_signal(predicted: &[f64], expected: &[f64], out: &mut [f64]) {
        for ((o, a), t) in out.iter_mut().zip(predicted.iter()).zip(expected.iter()) {
            *o = t - a;
        }
    }
}
