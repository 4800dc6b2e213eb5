//! Number-theoretic transform: the radix-2 iterative algorithm carried out
//! in `F_p` for a prime `p = 1 (mod N)` with primitive root `g`.
//!
//! With `k = (p - 1) / N`, `omega = g^k` is a primitive N-th root of unity
//! mod p, and the butterfly stages are those of the complex iterative engine
//! with all arithmetic reduced into `[0, p)`.

use {
    crate::{
        driver::Direction,
        error::TransformError,
        utils::{
            bit_reversal_permutation, bit_reversal_permutation_in_place, int_log2,
            is_power_of_two, pow2,
        },
    },
    fourier_number_theory::{is_prime, mod_pow, safe_mod},
};

pub fn ntt_into(src: &[i64], dst: &mut [i64], p: i64, g: i64) -> Result<(), TransformError> {
    if src.len() != dst.len() {
        return Err(TransformError::LengthMismatch {
            src: src.len(),
            dst: dst.len(),
        });
    }
    validate(src.len(), p, g)?;
    bit_reversal_permutation(src, dst);
    transform(dst, p, g, Direction::Forward);
    Ok(())
}

pub fn ntt_in_place(values: &mut [i64], p: i64, g: i64) -> Result<(), TransformError> {
    validate(values.len(), p, g)?;
    bit_reversal_permutation_in_place(values);
    transform(values, p, g, Direction::Forward);
    Ok(())
}

pub fn intt_into(src: &[i64], dst: &mut [i64], p: i64, g: i64) -> Result<(), TransformError> {
    if src.len() != dst.len() {
        return Err(TransformError::LengthMismatch {
            src: src.len(),
            dst: dst.len(),
        });
    }
    validate(src.len(), p, g)?;
    bit_reversal_permutation(src, dst);
    transform(dst, p, g, Direction::Inverse);
    Ok(())
}

pub fn intt_in_place(values: &mut [i64], p: i64, g: i64) -> Result<(), TransformError> {
    validate(values.len(), p, g)?;
    bit_reversal_permutation_in_place(values);
    transform(values, p, g, Direction::Inverse);
    Ok(())
}

fn validate(n: usize, p: i64, g: i64) -> Result<(), TransformError> {
    if !is_power_of_two(n) {
        return Err(TransformError::NotPowerOfTwo { len: n });
    }
    if !is_prime(p) {
        return Err(TransformError::ModulusNotPrime { p });
    }
    let len = n as i64;
    if n > 1 && p % len != 1 {
        return Err(TransformError::ModulusNotCongruent { p, n });
    }
    // omega = g^((p-1)/N) must have order exactly N, which for a power of
    // two reduces to omega^(N/2) != 1.
    if n > 1 {
        let omega = mod_pow(g, (p - 1) / len, p);
        if mod_pow(omega, len / 2, p) == 1 {
            return Err(TransformError::NotPrimitiveRoot { g, p, n });
        }
    }
    Ok(())
}

/// Butterfly stages over bit-reversed residues. The inverse direction swaps
/// the root for `g^(p-2)` and scales by `N^(-1) mod p` afterwards.
fn transform(values: &mut [i64], p: i64, g: i64, direction: Direction) {
    for value in values.iter_mut() {
        *value = safe_mod(*value, p);
    }

    let n = values.len();
    if n <= 1 {
        return;
    }

    let base = match direction {
        Direction::Forward => g,
        Direction::Inverse => mod_pow(g, p - 2, p),
    };
    let root = mod_pow(base, (p - 1) / n as i64, p);
    let stages = int_log2(n) as u32;

    for s in 1..=stages {
        let block = pow2(s);
        let half = block / 2;
        // The stage twiddle is a primitive 2^s-th root of unity.
        let twiddle = mod_pow(root, pow2(stages - s) as i64, p);

        for start in (0..n).step_by(block) {
            let mut twiddle_factor = 1_i64;
            for j in 0..half {
                let a = values[start + j];
                let b = twiddle_factor * values[start + j + half] % p;
                values[start + j] = (a + b) % p;
                values[start + j + half] = (a - b + p) % p;
                twiddle_factor = twiddle_factor * twiddle % p;
            }
        }
    }

    if direction == Direction::Inverse {
        let scale = mod_pow(n as i64, p - 2, p);
        for value in values.iter_mut() {
            *value = *value * scale % p;
        }
    }
}
