use std::io::Cursor;

use ferrite_perceptron::{Network, TestSet, Topology, TrainConfig, Trainer, WeightRange};

fn main() -> ferrite_perceptron::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    // No bias terms: from this starting point a 2-2-1 sigmoid net can still
    // separate XOR.
    let topology = Topology::new(2, &[2], 1)?;
    let mut network = Network::from_reader(topology.clone(), Cursor::new("0.4 0.7 0.9 1.3 0.7 1.3"))?;

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let expected_outputs = vec![
        vec![0.0],
        vec![1.0],
        vec![1.0],
        vec![0.0],
    ];
    let test_set = TestSet::from_rows(&topology, &inputs, &expected_outputs)?;

    let config = TrainConfig::new(100_000, 0.01, 1.0, WeightRange::new(-1.5, 1.5)?);
    let mut trainer = Trainer::new(config, test_set, &network)?;
    let report = trainer.train(&mut network)?;

    println!("{report}");
    for input in &inputs {
        let output = network.forward(input)?.output()[0];
        println!("Input: {:?} -> Output: {:.4}", input, output);
    }
    Ok(())
}
