use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{PerceptronError, Result};
use crate::math::tensor::WeightTensor;
use crate::network::topology::Topology;

/// Reads one weight per slot, row-major over `(n, k, j)`.
///
/// Values may be split across lines in any way; only their order matters.
/// Anything after the last slot is ignored with a warning.
///
/// # Errors
/// - `MalformedWeightData` if the stream ends before every slot is filled or
///   a token is not a number (undecodable bytes included)
/// - `Io` if the reader fails
pub fn read_weights<R: Read>(mut reader: R, topology: &Topology) -> Result<WeightTensor> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes).map_err(|e| PerceptronError::MalformedWeightData(
        format!("weight stream is not valid UTF-8 at byte {}", e.utf8_error().valid_up_to())
    ))?;

    let needed = topology.weight_count();
    let mut values = Vec::with_capacity(needed);
    let mut tokens = text.split_whitespace();

    for slot in 0..needed {
        let token = tokens.next().ok_or_else(|| PerceptronError::MalformedWeightData(format!(
            "stream ended after {slot} of {needed} weights for {topology}"
        )))?;
        let value = token.parse::<f64>().map_err(|_| PerceptronError::MalformedWeightData(
            format!("weight #{slot} `{token}` is not a number")
        ))?;
        values.push(value);
    }

    let surplus = tokens.count();
    if surplus > 0 {
        log::warn!("ignoring {surplus} value(s) after the last weight of {topology}");
    }

    WeightTensor::from_values(topology.widths(), values).ok_or_else(|| {
        PerceptronError::MalformedWeightData(format!("expected {needed} weights"))
    })
}

/// Writes every weight on its own line, row-major over `(n, k, j)`.
pub fn write_weights<W: Write>(mut writer: W, weights: &WeightTensor) -> Result<()> {
    for &value in weights.values() {
        write_weight(&mut writer, value)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a single weight line.
///
/// `Display` for `f64` prints the shortest text that parses back to the same
/// bits, which keeps save → load exact.
pub(crate) fn write_weight<W: Write + ?Sized>(writer: &mut W, value: f64) -> Result<()> {
    writeln!(writer, "{value}")?;
    Ok(())
}

pub fn load_weights_file(path: impl AsRef<Path>, topology: &Topology) -> Result<WeightTensor> {
    let file = File::open(path)?;
    read_weights(BufReader::new(file), topology)
}

/// Creates (or truncates) `path` and writes every weight into it.
pub fn save_weights_file(path: impl AsRef<Path>, weights: &WeightTensor) -> Result<()> {
    let file = File::create(path)?;
    write_weights(BufWriter::new(file), weights)
}
