pub mod runner;

pub use runner::{run, run_from_files};
