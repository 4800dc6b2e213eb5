//! Plumbing shared by every engine: the transform direction, argument
//! validation and the `1/N` scaling of inverse transforms.

use crate::{error::TransformError, utils::is_power_of_two, Complex64};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    /// Sign of `k` in the twiddle `e^(sign * 2*pi*i*k/N)`.
    pub(crate) const fn twiddle_sign(self) -> i64 {
        match self {
            Self::Forward => -1,
            Self::Inverse => 1,
        }
    }
}

/// Number of logical elements when reading a slice at the given stride.
pub(crate) const fn strided_len(len: usize, stride: usize) -> usize {
    if len == 0 {
        0
    } else {
        1 + (len - 1) / stride
    }
}

pub(crate) fn ensure_same_length(src: usize, dst: usize) -> Result<(), TransformError> {
    if src == dst {
        Ok(())
    } else {
        Err(TransformError::LengthMismatch { src, dst })
    }
}

pub(crate) fn ensure_power_of_two(len: usize) -> Result<(), TransformError> {
    if is_power_of_two(len) {
        Ok(())
    } else {
        Err(TransformError::NotPowerOfTwo { len })
    }
}

/// Divides every element by the transform length.
pub(crate) fn scale_by_length(values: &mut [Complex64]) {
    if values.is_empty() {
        return;
    }
    let scale = 1.0 / values.len() as f64;
    for value in values.iter_mut() {
        *value *= scale;
    }
}
