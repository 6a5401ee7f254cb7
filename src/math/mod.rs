pub mod tensor;

pub use tensor::{LayerBuffers, WeightTensor};
