//! Recursive radix-2 Cooley-Tukey transform. Splits the input into even and
//! odd subsequences by doubling the read stride, recurses, and combines the
//! halves with a per-stage twiddle.

use crate::{
    driver::{ensure_power_of_two, ensure_same_length, scale_by_length, strided_len, Direction},
    error::TransformError,
    naive,
    utils::root_of_unity,
    Complex64,
};

/// Subproblems at or below this length are handed to the naive engine.
pub const RECURSIVE_BASE_CASE: usize = 32;

pub fn dft_into(src: &[Complex64], dst: &mut [Complex64]) -> Result<(), TransformError> {
    ensure_same_length(src.len(), dst.len())?;
    ensure_power_of_two(src.len())?;
    engine(src, 1, dst, Direction::Forward);
    Ok(())
}

pub fn idft_into(src: &[Complex64], dst: &mut [Complex64]) -> Result<(), TransformError> {
    ensure_same_length(src.len(), dst.len())?;
    ensure_power_of_two(src.len())?;
    engine(src, 1, dst, Direction::Inverse);
    scale_by_length(dst);
    Ok(())
}

pub fn dft_in_place(values: &mut [Complex64]) -> Result<(), TransformError> {
    ensure_power_of_two(values.len())?;
    let mut scratch = vec![Complex64::new(0.0, 0.0); values.len()];
    engine(values, 1, &mut scratch, Direction::Forward);
    values.copy_from_slice(&scratch);
    Ok(())
}

pub fn idft_in_place(values: &mut [Complex64]) -> Result<(), TransformError> {
    ensure_power_of_two(values.len())?;
    let mut scratch = vec![Complex64::new(0.0, 0.0); values.len()];
    engine(values, 1, &mut scratch, Direction::Inverse);
    values.copy_from_slice(&scratch);
    scale_by_length(values);
    Ok(())
}

/// Transforms the logical sequence `src[0], src[stride], ...` into `dst`.
/// `dst` must hold exactly the logical length, which the recursion keeps a
/// power of two.
fn engine(src: &[Complex64], stride: usize, dst: &mut [Complex64], direction: Direction) {
    let n = strided_len(src.len(), stride);
    if n <= RECURSIVE_BASE_CASE {
        naive::engine(src, stride, dst, direction);
        return;
    }
    debug_assert!(n % 2 == 0);

    let half = n / 2;
    let (even, odd) = dst.split_at_mut(half);
    engine(src, 2 * stride, even, direction);
    engine(&src[stride..], 2 * stride, odd, direction);

    let root = root_of_unity(n, direction.twiddle_sign());
    let mut twiddle = Complex64::new(1.0, 0.0);
    for k in 0..half {
        let p = dst[k];
        let q = twiddle * dst[k + half];
        dst[k] = p + q;
        dst[k + half] = p - q;
        twiddle *= root;
    }
}

#[cfg(test)]
mod tests {
    use {super::*, proptest::prelude::*, rand::prelude::*};

    fn assert_close(actual: &[Complex64], expected: &[Complex64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).norm_sqr() <= 1e-3, "got {a}, expected {e}");
        }
    }

    fn random_signal(len: usize, seed: u64) -> Vec<Complex64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len)
            .map(|_| Complex64::new(rng.random_range(-1000.0..1000.0), rng.random_range(-1000.0..1000.0)))
            .collect()
    }

    #[test]
    fn agrees_with_the_naive_engine() {
        // 256 is large enough to leave the naive base case.
        let x = random_signal(256, 11);

        let mut expected = vec![Complex64::new(0.0, 0.0); x.len()];
        crate::naive::dft_into(&x, &mut expected).unwrap();

        let mut actual = vec![Complex64::new(0.0, 0.0); x.len()];
        dft_into(&x, &mut actual).unwrap();

        assert_close(&actual, &expected);
    }

    #[test]
    fn rejects_lengths_that_are_not_powers_of_two() {
        let x = vec![Complex64::new(0.0, 0.0); 12];
        let mut out = vec![Complex64::new(0.0, 0.0); 12];
        assert_eq!(
            dft_into(&x, &mut out),
            Err(TransformError::NotPowerOfTwo { len: 12 })
        );
        let mut x = x;
        assert_eq!(
            idft_in_place(&mut x),
            Err(TransformError::NotPowerOfTwo { len: 12 })
        );
    }

    #[test]
    fn in_place_matches_out_of_place() {
        let x = random_signal(128, 3);

        let mut out = vec![Complex64::new(0.0, 0.0); x.len()];
        dft_into(&x, &mut out).unwrap();

        let mut in_place = x;
        dft_in_place(&mut in_place).unwrap();

        assert_close(&in_place, &out);
    }

    proptest! {
        #[test]
        fn round_trip_recovers_the_signal(exponent in 0_u32..11, seed in 0_u64..1_000) {
            let x = random_signal(1 << exponent, seed);

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
