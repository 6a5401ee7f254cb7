use serde::{Serialize, Deserialize};

/// Statistics for one completed epoch, as returned by `Trainer::run_epoch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number within the current `Trainer`.
    pub epoch: usize,
    /// Largest post-update error over the test set.
    pub max_error: f64,
    /// Mean post-update error over the test set.
    pub mean_error: f64,
    /// Whether every example's error reached the threshold this epoch.
    pub converged: bool,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
