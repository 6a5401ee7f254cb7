//! Plain-text adapters for the on-disk formats.
//!
//! Every format is a bare ordered stream of whitespace-separated values with no
//! self-describing structure. Each reader parses and counts the full stream
//! before it hands back a value, so a malformed file never leaves a partially
//! filled tensor or test set behind.

pub mod examples;
pub mod hyperparams;
pub mod topology;
pub mod weights;

pub use examples::{load_examples_file, parse_example_line, read_examples};
pub use hyperparams::{load_hyperparams_file, read_hyperparams};
pub use topology::{load_topology_file, read_topology, write_topology};
pub use weights::{load_weights_file, read_weights, save_weights_file, write_weights};
