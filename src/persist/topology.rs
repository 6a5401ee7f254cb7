use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use crate::error::{PerceptronError, Result};
use crate::network::topology::Topology;

/// Reads a topology descriptor:
///
/// ```text
/// <input width>
/// <hidden layer count>
/// <hidden width>      (one per hidden layer, first to last)
/// <output width>
/// ```
///
/// # Errors
/// - `MalformedDescriptor` for missing or non-integer values
/// - `InvalidTopology` for widths below one, or when the number of widths
///   that follow disagrees with the declared hidden-layer count
pub fn read_topology<R: Read>(mut reader: R) -> Result<Topology> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let values = text.split_whitespace()
        .map(|token| token.parse::<i64>().map_err(|_| PerceptronError::MalformedDescriptor(
            format!("topology value `{token}` is not an integer")
        )))
        .collect::<Result<Vec<i64>>>()?;

    if values.len() < 2 {
        return Err(PerceptronError::MalformedDescriptor(
            "topology descriptor needs an input width and a hidden-layer count".into()
        ));
    }

    let input = to_width(values[0], "input layer")?;
    let hidden_count = values[1];
    if hidden_count < 0 {
        return Err(PerceptronError::InvalidTopology(format!(
            "hidden-layer count {hidden_count} is negative"
        )));
    }

    // Whatever follows is the hidden widths plus the output width.
    let rest = &values[2..];
    if rest.len() as i64 - 1 != hidden_count {
        return Err(PerceptronError::InvalidTopology(format!(
            "descriptor declares {hidden_count} hidden layer(s) but lists {} width(s) \
             after the count, output included",
            rest.len()
        )));
    }

    let (output, hidden) = rest.split_last()
        .ok_or_else(|| PerceptronError::MalformedDescriptor("missing output width".into()))?;
    let hidden = hidden.iter()
        .enumerate()
        .map(|(i, &w)| to_width(w, &format!("hidden layer {}", i + 1)))
        .collect::<Result<Vec<usize>>>()?;
    let output = to_width(*output, "output layer")?;

    Topology::new(input, &hidden, output)
}

/// Writes the descriptor `read_topology` expects, one value per line.
pub fn write_topology<W: Write>(mut writer: W, topology: &Topology) -> Result<()> {
    writeln!(writer, "{}", topology.input_width())?;
    writeln!(writer, "{}", topology.hidden_widths().len())?;
    for width in topology.hidden_widths() {
        writeln!(writer, "{width}")?;
    }
    writeln!(writer, "{}", topology.output_width())?;
    writer.flush()?;
    Ok(())
}

pub fn load_topology_file(path: impl AsRef<Path>) -> Result<Topology> {
    let file = File::open(path)?;
    read_topology(BufReader::new(file))
}

fn to_width(value: i64, layer: &str) -> Result<usize> {
    if value < 1 {
        return Err(PerceptronError::InvalidTopology(format!(
            "{layer} must have at least one node, got {value}"
        )));
    }
    Ok(value as usize)
}
