use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use crate::network::evaluation::Evaluation;
use crate::network::network::Network;
use crate::network::topology::Topology;
use crate::persist::examples::parse_example_line;

/// Evaluates every labeled line of `reader` against the network's current
/// weights, which are only read.
///
/// Lines are handled one at a time and blank lines are skipped. The first
/// malformed line aborts the run.
pub fn run<R: BufRead>(network: &mut Network, reader: R) -> Result<Vec<Evaluation>> {
    let mut evaluations = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let example = parse_example_line(&line, i + 1, network.topology())?;
        evaluations.push(network.evaluate(&example.input, &example.target)?);
    }
    log::info!("evaluated {} example(s) on {}", evaluations.len(), network.topology());
    Ok(evaluations)
}

/// Loads the weights at `weights_path` into a fresh network, then runs every
/// line of `inputs_path` through it.
pub fn run_from_files(
    topology: Topology,
    weights_path: impl AsRef<Path>,
    inputs_path: impl AsRef<Path>,
) -> Result<Vec<Evaluation>> {
    let mut network = Network::from_reader(topology, BufReader::new(File::open(weights_path)?))?;
    run(&mut network, BufReader::new(File::open(inputs_path)?))
}
