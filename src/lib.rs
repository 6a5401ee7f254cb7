pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod network;
pub mod optim;
pub mod data;
pub mod persist;
pub mod train;
pub mod inference;
pub mod imaging;

// Convenience re-exports
pub use error::{PerceptronError, Result};
pub use math::tensor::{LayerBuffers, WeightTensor};
pub use activation::sigmoid::Sigmoid;
pub use loss::squared_error::SquaredErrorLoss;
pub use network::{Evaluation, ForwardPass, Network, Topology, WeightRange};
pub use optim::sgd::Sgd;
pub use data::test_set::{Example, TestSet};
pub use train::{train_from_files, Backprop, EpochStats, TrainConfig, TrainReport, Trainer};
pub use inference::runner::run;
