pub mod evaluation;
pub mod init;
pub mod network;
pub mod topology;

pub use evaluation::Evaluation;
pub use init::{randomize_weights, WeightRange};
pub use network::{ForwardPass, Network};
pub use topology::Topology;
