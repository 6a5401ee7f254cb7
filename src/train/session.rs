use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;

use crate::error::Result;
use crate::network::network::Network;
use crate::network::topology::Topology;
use crate::persist::examples::load_examples_file;
use crate::persist::weights::save_weights_file;
use crate::train::report::TrainReport;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::Trainer;

/// Full file-driven training run.
///
/// 1. Loads the labeled examples from `examples_path` (exactly
///    `config.test_set_size` of them, when set).
/// 2. Randomizes the starting weights, writing each one to
///    `config.weights_file` as it is drawn.
/// 3. Trains until convergence or the iteration ceiling.
/// 4. Overwrites `config.weights_file` with the final weights.
///
/// Malformed examples abort before the weights file is touched.
pub fn train_from_files<R: Rng + ?Sized>(
    topology: Topology,
    config: &TrainConfig,
    examples_path: impl AsRef<Path>,
    rng: &mut R,
) -> Result<(Network, TrainReport)> {
    config.validate()?;
    let test_set = load_examples_file(examples_path, &topology, config.test_set_size)?;

    let mut network = {
        let mut sink = BufWriter::new(File::create(&config.weights_file)?);
        let network = Network::randomized(topology, config.weight_range, rng, &mut sink)?;
        sink.flush()?;
        network
    };
    log::info!("initial weights written to {}", config.weights_file.display());

    let mut trainer = Trainer::new(config.clone(), test_set, &network)?;
    let report = trainer.train(&mut network)?;

    save_weights_file(&config.weights_file, network.weights())?;
    log::info!("final weights written to {}", config.weights_file.display());

    Ok((network, report))
}
