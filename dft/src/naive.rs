//! Direct `O(N^2)` evaluation of the transform sum. Accepts any length,
//! including lengths that are not powers of two; the radix-2 engines defer
//! to this one below their base-case size.

use crate::{
    driver::{ensure_same_length, scale_by_length, strided_len, Direction},
    error::TransformError,
    utils::root_of_unity,
    Complex64,
};

pub fn dft_into(src: &[Complex64], dst: &mut [Complex64]) -> Result<(), TransformError> {
    ensure_same_length(src.len(), dst.len())?;
    engine(src, 1, dst, Direction::Forward);
    Ok(())
}

pub fn idft_into(src: &[Complex64], dst: &mut [Complex64]) -> Result<(), TransformError> {
    ensure_same_length(src.len(), dst.len())?;
    engine(src, 1, dst, Direction::Inverse);
    scale_by_length(dst);
    Ok(())
}

pub fn dft_in_place(values: &mut [Complex64]) -> Result<(), TransformError> {
    let mut scratch = vec![Complex64::new(0.0, 0.0); values.len()];
    engine(values, 1, &mut scratch, Direction::Forward);
    values.copy_from_slice(&scratch);
    Ok(())
}

pub fn idft_in_place(values: &mut [Complex64]) -> Result<(), TransformError> {
    let mut scratch = vec![Complex64::new(0.0, 0.0); values.len()];
    engine(values, 1, &mut scratch, Direction::Inverse);
    values.copy_from_slice(&scratch);
    scale_by_length(values);
    Ok(())
}

/// Transforms the logical sequence `src[0], src[stride], src[2*stride], ...`
/// into the first `n` slots of `dst`. Each output accumulates with an
/// incrementally updated twiddle factor instead of recomputing the
/// exponential per term.
pub(crate) fn engine(src: &[Complex64], stride: usize, dst: &mut [Complex64], direction: Direction) {
    let n = strided_len(src.len(), stride);
    debug_assert!(dst.len() >= n);

    for (k, out) in dst.iter_mut().take(n).enumerate() {
        let twiddle = root_of_unity(n, direction.twiddle_sign() * k as i64);
        let mut twiddle_factor = Complex64::new(1.0, 0.0);
        let mut sum = Complex64::new(0.0, 0.0);
        for index in (0..src.len()).step_by(stride) {
            sum += src[index] * twiddle_factor;
            twiddle_factor *= twiddle;
        }
        *out = sum;
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::utils::root_of_unity, proptest::prelude::*};

    fn assert_close(actual: &[Complex64], expected: &[Complex64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).norm_sqr() <= 1e-3, "got {a}, expected {e}");
        }
    }

    #[test]
    fn constant_signal_concentrates_in_the_zero_bin() {
        let x = vec![Complex64::new(1.0, 0.0); 4];
        let mut out = vec![Complex64::new(0.0, 0.0); 4];
        dft_into(&x, &mut out).unwrap();

        let expected: Vec<_> = [4.0, 0.0, 0.0, 0.0]
            .iter()
            .map(|&re| Complex64::new(re, 0.0))
            .collect();
        assert_close(&out, &expected);
    }

    #[test]
    fn unit_impulse_spreads_flat() {
        let mut x = vec![Complex64::new(0.0, 0.0); 4];
        x[0] = Complex64::new(1.0, 0.0);
        let mut out = vec![Complex64::new(0.0, 0.0); 4];
        dft_into(&x, &mut out).unwrap();

        assert_close(&out, &vec![Complex64::new(1.0, 0.0); 4]);
    }

    #[test]
    fn accepts_lengths_that_are_not_powers_of_two() {
        let x: Vec<_> = (0..7).map(|i| Complex64::new(i as f64, -(i as f64))).collect();
        let mut freq = vec![Complex64::new(0.0, 0.0); 7];
        dft_into(&x, &mut freq).unwrap();
        let mut back = vec![Complex64::new(0.0, 0.0); 7];
        idft_into(&freq, &mut back).unwrap();

        assert_close(&back, &x);
    }

    #[test]
    fn in_place_matches_out_of_place() {
        let x: Vec<_> = (0..16_i64)
            .map(|i| root_of_unity(16, i) * (i % 5) as f64)
            .collect();

        let mut out = vec![Complex64::new(0.0, 0.0); 16];
        dft_into(&x, &mut out).unwrap();

        let mut in_place = x;
        dft_in_place(&mut in_place).unwrap();

        assert_close(&in_place, &out);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let x = vec![Complex64::new(0.0, 0.0); 4];
        let mut out = vec![Complex64::new(0.0, 0.0); 5];
        assert_eq!(
            dft_into(&x, &mut out),
            Err(TransformError::LengthMismatch { src: 4, dst: 5 })
        );
    }

    proptest! {
        #[test]
        fn round_trip_recovers_the_signal(
            parts in proptest::collection::vec((-1000.0_f64..1000.0, -1000.0_f64..1000.0), 1..64)
        ) {
            let x: Vec<_> = parts.iter().map(|&(re, im)| Complex64::new(re, im)).collect();
            let mut freq = vec![Complex64::new(0.0, 0.0); x.len()];
            dft_into(&x, &mut freq).unwrap();
            let mut back = vec![Complex64::new(0.0, 0.0); x.len()];
            idft_into(&freq, &mut back).unwrap();

            for (a, e) in back.iter().zip(&x) {
                prop_assert!((a - e).norm_sqr() <= 1e-3);
            }
        }
    }
}
