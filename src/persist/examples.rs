use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::data::test_set::{Example, TestSet};
use crate::error::{PerceptronError, Result};
use crate::network::topology::Topology;

/// Parses one example line: the input values followed by the target values,
/// separated by whitespace.
///
/// `line_no` is 1-based and only used in error messages.
///
/// # Errors
/// - `MalformedExampleData` for a non-numeric token or a line that runs out
///   before every input and target value is read
/// - `DimensionMismatch` for a line carrying more values than the topology has
///   input plus output nodes
pub fn parse_example_line(line: &str, line_no: usize, topology: &Topology) -> Result<Example> {
    let values = line.split_whitespace()
        .map(|token| token.parse::<f64>().map_err(|_| PerceptronError::MalformedExampleData(
            format!("line {line_no}: `{token}` is not a number")
        )))
        .collect::<Result<Vec<f64>>>()?;

    let n_in = topology.input_width();
    let n_out = topology.output_width();
    let expected = n_in + n_out;

    if values.len() < expected {
        return Err(PerceptronError::MalformedExampleData(format!(
            "line {line_no}: expected {n_in} input and {n_out} target value(s), found {} value(s)",
            values.len()
        )));
    }
    if values.len() > expected {
        return Err(PerceptronError::DimensionMismatch {
            what: "example",
            expected,
            got: values.len(),
        });
    }

    let mut input = values;
    let target = input.split_off(n_in);
    Ok(Example::new(input, target))
}

/// Reads every non-blank line as an example.
///
/// When `expected_count` is set, the stream must hold exactly that many
/// examples. A line that is not valid UTF-8 is `MalformedExampleData`.
pub fn read_examples<R: BufRead>(
    reader: R,
    topology: &Topology,
    expected_count: Option<usize>,
) -> Result<TestSet> {
    let mut examples = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => PerceptronError::MalformedExampleData(
                format!("line {}: not valid UTF-8", i + 1)
            ),
            _ => PerceptronError::Io(e),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        examples.push(parse_example_line(&line, i + 1, topology)?);
    }

    if let Some(expected) = expected_count {
        if examples.len() != expected {
            return Err(PerceptronError::MalformedExampleData(format!(
                "expected {expected} example(s), found {}",
                examples.len()
            )));
        }
    }

    TestSet::new(topology, examples)
}

pub fn load_examples_file(
    path: impl AsRef<Path>,
    topology: &Topology,
    expected_count: Option<usize>,
) -> Result<TestSet> {
    let file = File::open(path)?;
    read_examples(BufReader::new(file), topology, expected_count)
}
