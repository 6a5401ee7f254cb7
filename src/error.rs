use thiserror::Error;

/// Every failure the perceptron can surface to a caller.
///
/// None of these are retried: a malformed record aborts the whole run or
/// training invocation rather than being skipped.
#[derive(Debug, Error)]
pub enum PerceptronError {
    /// A layer width below one, fewer than two layers, or a descriptor whose
    /// declared hidden-layer count disagrees with the widths it lists.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// An input or target vector whose length disagrees with the topology.
    #[error("dimension mismatch: expected {expected} {what} value(s), got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("malformed weight data: {0}")]
    MalformedWeightData(String),

    #[error("malformed example data: {0}")]
    MalformedExampleData(String),

    /// Topology or hyperparameter descriptor that cannot be parsed.
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(String),

    #[error("invalid weight range: low bound {low} is greater than high bound {high}")]
    InvalidRange { low: f64, high: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("image failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PerceptronError>;
