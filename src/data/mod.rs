pub mod test_set;

pub use test_set::{Example, TestSet};
