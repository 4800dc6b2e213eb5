//! Plain-text signal format used by the command-line front-ends: the sample
//! count followed by the samples, whitespace separated.

use {
    std::io::{BufRead, Write},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum SignalIoError {
    #[error("failed to read the signal")]
    Io(#[from] std::io::Error),

    #[error("the signal length must be a positive integer, got {value:?}")]
    InvalidLength { value: String },

    #[error("invalid sample value {value:?}")]
    InvalidSample { value: String },
}

/// Reads `M x_0 x_1 ... x_(M-1)`.
pub fn read_signal<R: BufRead>(mut reader: R) -> Result<Vec<f64>, SignalIoError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut tokens = text.split_whitespace();

    let length_token = tokens.next().unwrap_or_default();
    let length: usize = match length_token.parse() {
        Ok(length) if length > 0 => length,
        _ => {
            return Err(SignalIoError::InvalidLength {
                value: length_token.to_owned(),
            })
        }
    };

    let mut signal = Vec::with_capacity(length);
    for _ in 0..length {
        let token = tokens.next().unwrap_or_default();
        let sample: f64 = token.parse().map_err(|_| SignalIoError::InvalidSample {
            value: token.to_owned(),
        })?;
        signal.push(sample);
    }
    Ok(signal)
}

/// Writes the same format back out.
pub fn write_signal<W: Write>(mut writer: W, signal: &[f64]) -> std::io::Result<()> {
    writeln!(writer, "{}", signal.len())?;
    for (i, sample) in signal.iter().enumerate() {
        let separator = if i == 0 { "" } else { " " };
        write!(writer, "{separator}{sample}")?;
    }
    writeln!(writer)
}
