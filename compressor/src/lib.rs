//! Lossy compression of real 1-D signals by frequency truncation: keep the
//! `k` strongest bins of the padded signal's spectrum and drop the rest.

mod io;

pub use io::{read_signal, write_signal, SignalIoError};

use {
    fourier_dft::{iterative, TransformError},
    num_complex::Complex64,
    serde::{Deserialize, Serialize},
    thiserror::Error,
    tracing::instrument,
};

/// Default number of retained frequency bins.
pub const DEFAULT_NUM_FREQUENCIES: usize = 2;

/// One retained bin of the spectrum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedItem {
    pub index: u32,
    pub value: Complex64,
}

/// The retained bins; indices are distinct and below the padded length that
/// [`decompress`] recomputes from the signal length.
pub type EncodedData = Vec<EncodedItem>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressError {
    #[error("the signal must hold at least one sample")]
    EmptySignal,

    #[error("encoded index {index} is out of range for padded length {len}")]
    IndexOutOfRange { index: u32, len: usize },

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Padded transform length for a signal of `len` samples.
fn padded_len(len: usize) -> usize {
    len.next_power_of_two()
}

/// Keeps the `num_frequencies` strongest bins of the padded signal's
/// spectrum.
///
/// The signal is padded to the next power of two with its mean, which keeps
/// the padding from introducing a sharp edge into the spectrum. Selection
/// uses a partial sort: the retained bins all dominate the discarded ones,
/// but carry no order among themselves.
#[instrument(skip_all, fields(samples = signal.len(), num_frequencies = num_frequencies))]
pub fn compress(signal: &[f64], num_frequencies: usize) -> Result<EncodedData, CompressError> {
    if signal.is_empty() {
        return Err(CompressError::EmptySignal);
    }

    let n = padded_len(signal.len());
    let mean = signal.iter().sum::<f64>() / signal.len() as f64;
    let mut padded: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    padded.resize(n, Complex64::new(mean, 0.0));

    iterative::dft_in_place(&mut padded)?;

    let mut encoded: EncodedData = padded
        .into_iter()
        .enumerate()
        .map(|(index, value)| EncodedItem {
            index: index as u32,
            value,
        })
        .collect();

    // At most N bins exist.
    let keep = num_frequencies.min(n);
    if keep < n {
        encoded.select_nth_unstable_by(keep, |a, b| {
            b.value.norm_sqr().total_cmp(&a.value.norm_sqr())
        });
        encoded.truncate(keep);
    }
    Ok(encoded)
}

/// Rebuilds `output_len` samples from the retained bins: overlay them on a
/// zeroed spectrum of the padded length, invert, and keep the real parts.
#[instrument(skip_all, fields(bins = encoded.len(), output_len = output_len))]
pub fn decompress(encoded: &EncodedData, output_len: usize) -> Result<Vec<f64>, CompressError> {
    if output_len == 0 {
        return Err(CompressError::EmptySignal);
    }

    let n = padded_len(output_len);
    let mut spectrum = vec![Complex64::new(0.0, 0.0); n];
    for item in encoded {
        let index = item.index as usize;
        if index >= n {
            return Err(CompressError::IndexOutOfRange {
                index: item.index,
                len: n,
            });
        }
        spectrum[index] = item.value;
    }

    iterative::idft_in_place(&mut spectrum)?;

    Ok(spectrum.iter().take(output_len).map(|value| value.re).collect())
}
