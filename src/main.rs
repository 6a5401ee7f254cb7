use std::path::Path;
use std::process;
use std::time::Instant;

use image::ImageFormat;

use ferrite_perceptron::{imaging, inference, persist, train_from_files, Result, TrainConfig};

const USAGE: &str = "\
usage:
  ferrite-perceptron run <dimensions> <weights> <inputs>
  ferrite-perceptron train <dimensions> <hyperparams> <inputs>
  ferrite-perceptron convert <input-image> <output.bmp>
  ferrite-perceptron resize <input-image> <output-image> <width> <height>
  ferrite-perceptron resize <input-image> <output-image> --percent <factor>

<dimensions>  input width, hidden-layer count, hidden widths, output width
<hyperparams> text descriptor, or a .json TrainConfig
Set RUST_LOG=debug for training progress.";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let outcome = match args.as_slice() {
        ["run", dimensions, weights, inputs] => run(dimensions, weights, inputs),
        ["train", dimensions, hyperparams, inputs] => train(dimensions, hyperparams, inputs),
        ["convert", input, output] => {
            imaging::convert_format(input, output, ImageFormat::Bmp)
                .map(|()| println!("Image converted successfully."))
        }
        ["resize", input, output, "--percent", factor] => parse(factor, "scale factor")
            .and_then(|factor| imaging::resize_by(input, output, factor)),
        ["resize", input, output, width, height] => parse(width, "width")
            .and_then(|w| Ok((w, parse(height, "height")?)))
            .and_then(|(w, h)| imaging::resize_exact(input, output, w, h)),
        _ => {
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = outcome {
        log::error!("{e}");
        process::exit(1);
    }
}

fn run(dimensions: &str, weights: &str, inputs: &str) -> Result<()> {
    let topology = persist::load_topology_file(dimensions)?;
    for evaluation in inference::run_from_files(topology, weights, inputs)? {
        println!("{evaluation}\n");
    }
    Ok(())
}

fn train(dimensions: &str, hyperparams: &str, inputs: &str) -> Result<()> {
    let topology = persist::load_topology_file(dimensions)?;
    let config = if Path::new(hyperparams).extension().is_some_and(|ext| ext == "json") {
        TrainConfig::load_json(hyperparams)?
    } else {
        persist::load_hyperparams_file(hyperparams)?
    };

    let t_start = Instant::now();
    let (_, report) = train_from_files(topology, &config, inputs, &mut rand::thread_rng())?;
    println!("{report}");
    log::info!("whole run took {} ms", t_start.elapsed().as_millis());
    Ok(())
}

fn parse<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value.parse().map_err(|_| ferrite_perceptron::PerceptronError::InvalidConfig(
        format!("{what} `{value}` is not a valid number")
    ))
}
