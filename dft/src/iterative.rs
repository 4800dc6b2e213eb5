//! Iterative radix-2 transform: a bit-reversal permutation followed by
//! `log N` stages of in-place butterflies over blocks of doubling size.

use crate::{
    driver::{ensure_power_of_two, ensure_same_length, scale_by_length, Direction},
    error::TransformError,
    utils::{bit_reversal_permutation, bit_reversal_permutation_in_place, int_log2, pow2, root_of_unity},
    Complex64,
};

pub fn dft_into(src: &[Complex64], dst: &mut [Complex64]) -> Result<(), TransformError> {
    ensure_same_length(src.len(), dst.len())?;
    ensure_power_of_two(src.len())?;
    bit_reversal_permutation(src, dst);
    butterflies(dst, Direction::Forward);
    Ok(())
}

pub fn idft_into(src: &[Complex64], dst: &mut [Complex64]) -> Result<(), TransformError> {
    ensure_same_length(src.len(), dst.len())?;
    ensure_power_of_two(src.len())?;
    bit_reversal_permutation(src, dst);
    butterflies(dst, Direction::Inverse);
    scale_by_length(dst);
    Ok(())
}

pub fn dft_in_place(values: &mut [Complex64]) -> Result<(), TransformError> {
    ensure_power_of_two(values.len())?;
    bit_reversal_permutation_in_place(values);
    butterflies(values, Direction::Forward);
    Ok(())
}

pub fn idft_in_place(values: &mut [Complex64]) -> Result<(), TransformError> {
    ensure_power_of_two(values.len())?;
    bit_reversal_permutation_in_place(values);
    butterflies(values, Direction::Inverse);
    scale_by_length(values);
    Ok(())
}

/// Butterfly stages over bit-reversed input. Stage `s` walks the values in
/// blocks of `2^s`, combining each block's halves with an incrementally
/// updated power of the stage twiddle `e^(-+2*pi*i/2^s)`.
fn butterflies(values: &mut [Complex64], direction: Direction) {
    let n = values.len();
    let stages = int_log2(n) as u32;

    for s in 1..=stages {
        let block = pow2(s);
        let half = block / 2;
        let twiddle = root_of_unity(block, direction.twiddle_sign());

        for start in (0..n).step_by(block) {
            let mut twiddle_factor = Complex64::new(1.0, 0.0);
            for j in 0..half {
                let a = values[start + j];
                let b = twiddle_factor * values[start + j + half];
                values[start + j] = a + b;
                values[start + j + half] = a - b;
                twiddle_factor *= twiddle;
            }
        }
    }
}
