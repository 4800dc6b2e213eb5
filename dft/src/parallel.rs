//! Parallel variants of the three engines, parameterized over any
//! [`Parallelizer`]. Within one transform the parallel output is the
//! sequential output: the naive engine spreads the independent output bins,
//! the recursive engine submits its two halves as tasks, and the iterative
//! engine spreads the disjoint butterfly blocks of each stage while keeping
//! the addition order inside a block untouched.

use {
    crate::{
        driver::{ensure_power_of_two, ensure_same_length, scale_by_length, strided_len, Direction},
        error::TransformError,
        utils::{
            bit_reversal_permutation, bit_reversal_permutation_in_place, int_log2, pow2,
            root_of_unity,
        },
        Complex64,
    },
    fourier_parallel::{Parallelizer, SyncSlice, Task},
};

pub mod naive {
    use super::*;

    pub fn dft_into<P: Parallelizer>(
        src: &[Complex64],
        dst: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        ensure_same_length(src.len(), dst.len())?;
        engine(src, 1, dst, Direction::Forward, parallelizer);
        Ok(())
    }

    pub fn idft_into<P: Parallelizer>(
        src: &[Complex64],
        dst: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        ensure_same_length(src.len(), dst.len())?;
        engine(src, 1, dst, Direction::Inverse, parallelizer);
        scale_by_length(dst);
        Ok(())
    }

    pub fn dft_in_place<P: Parallelizer>(
        values: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        let mut scratch = vec![Complex64::new(0.0, 0.0); values.len()];
        engine(values, 1, &mut scratch, Direction::Forward, parallelizer);
        values.copy_from_slice(&scratch);
        Ok(())
    }

    pub fn idft_in_place<P: Parallelizer>(
        values: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        let mut scratch = vec![Complex64::new(0.0, 0.0); values.len()];
        engine(values, 1, &mut scratch, Direction::Inverse, parallelizer);
        values.copy_from_slice(&scratch);
        scale_by_length(values);
        Ok(())
    }

    /// The output bin `k` is the parallel axis; every iteration owns its
    /// slot of `dst`.
    pub(super) fn engine<P: Parallelizer>(
        src: &[Complex64],
        stride: usize,
        dst: &mut [Complex64],
        direction: Direction,
        parallelizer: &P,
    ) {
        let n = strided_len(src.len(), stride);
        debug_assert!(dst.len() >= n);

        let bins = SyncSlice::new(dst);
        parallelizer.parallel_for(0, n, |k| {
            let twiddle = root_of_unity(n, direction.twiddle_sign() * k as i64);
            let mut twiddle_factor = Complex64::new(1.0, 0.0);
            let mut sum = Complex64::new(0.0, 0.0);
            for index in (0..src.len()).step_by(stride) {
                sum += src[index] * twiddle_factor;
                twiddle_factor *= twiddle;
            }
            // Safety: each iteration writes only its own bin `k`.
            unsafe {
                *bins.get_mut(k) = sum;
            }
        });
    }
}

pub mod recursive {
    use super::*;

    pub fn dft_into<P: Parallelizer>(
        src: &[Complex64],
        dst: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        ensure_same_length(src.len(), dst.len())?;
        ensure_power_of_two(src.len())?;
        engine(src, 1, dst, Direction::Forward, parallelizer);
        Ok(())
    }

    pub fn idft_into<P: Parallelizer>(
        src: &[Complex64],
        dst: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        ensure_same_length(src.len(), dst.len())?;
        ensure_power_of_two(src.len())?;
        engine(src, 1, dst, Direction::Inverse, parallelizer);
        scale_by_length(dst);
        Ok(())
    }

    pub fn dft_in_place<P: Parallelizer>(
        values: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        ensure_power_of_two(values.len())?;
        let mut scratch = vec![Complex64::new(0.0, 0.0); values.len()];
        engine(values, 1, &mut scratch, Direction::Forward, parallelizer);
        values.copy_from_slice(&scratch);
        Ok(())
    }

    pub fn idft_in_place<P: Parallelizer>(
        values: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        ensure_power_of_two(values.len())?;
        let mut scratch = vec![Complex64::new(0.0, 0.0); values.len()];
        engine(values, 1, &mut scratch, Direction::Inverse, parallelizer);
        values.copy_from_slice(&scratch);
        scale_by_length(values);
        Ok(())
    }

    /// The two half-size recursions are independent tasks; a nested call
    /// entered from a worker runs them inline on the exhausted budget.
    fn engine<P: Parallelizer>(
        src: &[Complex64],
        stride: usize,
        dst: &mut [Complex64],
        direction: Direction,
        parallelizer: &P,
    ) {
        let n = strided_len(src.len(), stride);
        if n <= crate::recursive::RECURSIVE_BASE_CASE {
            crate::naive::engine(src, stride, dst, direction);
            return;
        }
        debug_assert!(n % 2 == 0);

        let half = n / 2;
        let (even, odd) = dst.split_at_mut(half);
        let tasks: Vec<Task> = vec![
            Box::new(move || engine(src, 2 * stride, even, direction, parallelizer)),
            Box::new(move || engine(&src[stride..], 2 * stride, odd, direction, parallelizer)),
        ];
        parallelizer.parallel_calls(tasks);

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
}

pub mod iterative {
    use super::*;

    pub fn dft_into<P: Parallelizer>(
        src: &[Complex64],
        dst: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        ensure_same_length(src.len(), dst.len())?;
        ensure_power_of_two(src.len())?;
        bit_reversal_permutation(src, dst);
        butterflies(dst, Direction::Forward, parallelizer);
        Ok(())
    }

    pub fn idft_into<P: Parallelizer>(
        src: &[Complex64],
        dst: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        ensure_same_length(src.len(), dst.len())?;
        ensure_power_of_two(src.len())?;
        bit_reversal_permutation(src, dst);
        butterflies(dst, Direction::Inverse, parallelizer);
        scale_by_length(dst);
        Ok(())
    }

    pub fn dft_in_place<P: Parallelizer>(
        values: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        ensure_power_of_two(values.len())?;
        bit_reversal_permutation_in_place(values);
        butterflies(values, Direction::Forward, parallelizer);
        Ok(())
    }

    pub fn idft_in_place<P: Parallelizer>(
        values: &mut [Complex64],
        parallelizer: &P,
    ) -> Result<(), TransformError> {
        ensure_power_of_two(values.len())?;
        bit_reversal_permutation_in_place(values);
        butterflies(values, Direction::Inverse, parallelizer);
        scale_by_length(values);
        Ok(())
    }

    /// Per stage, the blocks are disjoint and become the parallel axis. The
    /// butterflies inside a block stay sequential so the floating-point
    /// addition order matches the sequential engine.
    fn butterflies<P: Parallelizer>(
        values: &mut [Complex64],
        direction: Direction,
        parallelizer: &P,
    ) {
        let n = values.len();
        let stages = int_log2(n) as u32;
        let blocks = SyncSlice::new(values);

        for s in 1..=stages {
            let block = pow2(s);
            let half = block / 2;
            let twiddle = root_of_unity(block, direction.twiddle_sign());

            parallelizer.parallel_for(0, n / block, |index| {
                let start = index * block;
                let mut twiddle_factor = Complex64::new(1.0, 0.0);
                for j in 0..half {
                    // Safety: iteration `index` touches only the block
                    // `[start, start + block)`; blocks do not overlap.
                    unsafe {
                        let a = *blocks.get_mut(start + j);
                        let b = twiddle_factor * *blocks.get_mut(start + j + half);
                        *blocks.get_mut(start + j) = a + b;
                        *blocks.get_mut(start + j + half) = a - b;
                    }
                    twiddle_factor *= twiddle;
                }
            });
        }
    }
}
