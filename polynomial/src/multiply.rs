//! Multiplication strategies.
//!
//! Three specializations of the same contract: [`naive_multiply`] is always
//! valid, [`complex_multiply`]/[`real_multiply`] evaluate through the complex
//! FFT, and [`integer_multiply`] is exact, convolving modulo two NTT-friendly
//! primes and recombining with the Chinese remainder theorem. The choice
//! between them depends only on the operand degrees and the coefficient
//! type: at or below [`NAIVE_FALLBACK_THRESHOLD`] the transform strategies
//! defer to the naive product.

use {
    crate::Polynomial,
    fourier_dft::{iterative, modular, TransformError},
    fourier_number_theory::{
        find_primes_in_ap, modular_inverse, primitive_root_mod_prime, safe_mod, NumberTheoryError,
    },
    fourier_parallel::{FixedThreadsParallelizer, Parallelizer, SyncSlice, Task},
    num_complex::Complex64,
    num_traits::Zero,
    std::ops::Mul,
    thiserror::Error,
    tracing::{debug, instrument},
};

/// Operands with degree at or below this go through the naive product.
pub const NAIVE_FALLBACK_THRESHOLD: usize = 8;

/// The NTT length is never smaller than `2^MIN_NTT_EXPONENT`, which keeps
/// the prime search in a range where suitable primes are dense.
pub const MIN_NTT_EXPONENT: u32 = 14;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MultiplyError {
    #[error(transparent)]
    NumberTheory(#[from] NumberTheoryError),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Schoolbook convolution, `O(deg A * deg B)`. Valid for any degrees; the
/// product with a zero polynomial collapses to the zero polynomial.
pub fn naive_multiply<T>(a: &Polynomial<T>, b: &Polynomial<T>) -> Polynomial<T>
where
    T: Copy + Zero + Mul<Output = T>,
{
    let degree = a.degree() + b.degree();
    let mut coefficients = vec![T::zero(); degree + 1];
    for (k, coefficient) in coefficients.iter_mut().enumerate() {
        let mut sum = T::zero();
        for l in 0..=k {
            sum = sum + a.coefficient(l) * b.coefficient(k - l);
        }
        *coefficient = sum;
    }
    Polynomial::new(coefficients)
}

/// Frequency-domain product: zero-pad to `N = next_pow2(deg A + deg B + 1)`,
/// transform both operands (concurrently, on a two-thread budget), multiply
/// pointwise and invert.
pub fn complex_multiply(
    a: &Polynomial<Complex64>,
    b: &Polynomial<Complex64>,
) -> Polynomial<Complex64> {
    if a.degree() <= NAIVE_FALLBACK_THRESHOLD || b.degree() <= NAIVE_FALLBACK_THRESHOLD {
        return naive_multiply(a, b);
    }

    let product_len = a.degree() + b.degree() + 1;
    let n = product_len.next_power_of_two();

    let mut padded_a = vec![Complex64::new(0.0, 0.0); n];
    padded_a[..a.degree() + 1].copy_from_slice(a.coefficients());
    let mut padded_b = vec![Complex64::new(0.0, 0.0); n];
    padded_b[..b.degree() + 1].copy_from_slice(b.coefficients());

    let mut evals_a = vec![Complex64::new(0.0, 0.0); n];
    let mut evals_b = vec![Complex64::new(0.0, 0.0); n];
    let mut forward_a = Ok(());
    let mut forward_b = Ok(());
    {
        let tasks: Vec<Task> = vec![
            Box::new(|| forward_a = iterative::dft_into(&padded_a, &mut evals_a)),
            Box::new(|| forward_b = iterative::dft_into(&padded_b, &mut evals_b)),
        ];
        FixedThreadsParallelizer::new(2).parallel_calls(tasks);
    }
    forward_a.expect("padded length is a power of two");
    forward_b.expect("padded length is a power of two");

    let mut coefficients: Vec<Complex64> =
        evals_a.iter().zip(&evals_b).map(|(x, y)| x * y).collect();
    iterative::idft_in_place(&mut coefficients).expect("padded length is a power of two");

    coefficients.truncate(product_len);
    Polynomial::new(coefficients)
}

/// [`complex_multiply`] over real coefficients, keeping the real parts.
pub fn real_multiply(a: &Polynomial<f64>, b: &Polynomial<f64>) -> Polynomial<f64> {
    let lift = |p: &Polynomial<f64>| {
        Polynomial::new(
            p.coefficients()
                .iter()
                .map(|&c| Complex64::new(c, 0.0))
                .collect(),
        )
    };
    let product = complex_multiply(&lift(a), &lift(b));
    Polynomial::new(product.coefficients().iter().map(|c| c.re).collect())
}

/// Exact integer product via NTT convolution modulo two primes.
///
/// The transform length is `N = 2^max(14, ceil_log2(deg A + deg B + 1) + 1)`
/// and the moduli are the first two primes in `{k*N + 1}`. The two modular
/// convolutions run concurrently, each running its two forward transforms
/// concurrently in turn on the same pool, and the per-coefficient CRT
/// recombination is a parallel loop.
///
/// The result is lifted into the balanced range `(-p0*p1/2, p0*p1/2]`, which
/// recovers the true signed coefficients as long as they are bounded by
/// `p0*p1/2`; with coefficients up to `10^4` and degrees up to `10^5` the
/// chosen primes satisfy this.
#[instrument(skip_all, fields(deg_a = a.degree(), deg_b = b.degree()))]
pub fn integer_multiply(
    a: &Polynomial<i64>,
    b: &Polynomial<i64>,
) -> Result<Polynomial<i64>, MultiplyError> {
    if a.degree() <= NAIVE_FALLBACK_THRESHOLD || b.degree() <= NAIVE_FALLBACK_THRESHOLD {
        return Ok(naive_multiply(a, b));
    }

    let product_len = a.degree() + b.degree() + 1;
    let exponent = MIN_NTT_EXPONENT.max(product_len.next_power_of_two().trailing_zeros() + 1);
    let n = 1_usize << exponent;

    let primes = find_primes_in_ap(n as i64, 2)?;
    let (p0, p1) = (primes[0], primes[1]);
    debug!(p0, p1, n, "transform moduli chosen");

    let pool = FixedThreadsParallelizer::default();

    let mut residues_0 = vec![0_i64; n];
    let mut residues_1 = vec![0_i64; n];
    let mut outcome_0 = Ok(());
    let mut outcome_1 = Ok(());
    {
        let tasks: Vec<Task> = vec![
            Box::new(|| outcome_0 = modular_convolution(a, b, p0, &mut residues_0, &pool)),
            Box::new(|| outcome_1 = modular_convolution(a, b, p1, &mut residues_1, &pool)),
        ];
        pool.parallel_calls(tasks);
    }
    outcome_0?;
    outcome_1?;

    let modulus = p0 * p1;
    let inverse_p0 = modular_inverse(safe_mod(p0, p1), p1)?;

    let mut coefficients = vec![0_i64; product_len];
    let slots = SyncSlice::new(&mut coefficients);
    pool.parallel_for(0, product_len, |k| {
        // Pairwise Chinese remainder combination of (r0 mod p0, r1 mod p1),
        // then the lift into the balanced range.
        let r0 = residues_0[k];
        let r1 = residues_1[k];
        let step = safe_mod((r1 - r0) * inverse_p0, p1);
        let mut value = r0 + p0 * step;
        if value > modulus / 2 {
            value -= modulus;
        }
        // Safety: each iteration writes only its own coefficient `k`.
        unsafe {
            *slots.get_mut(k) = value;
        }
    });

    Ok(Polynomial::new(coefficients))
}

/// `out = A * B mod p`: two concurrent forward transforms, a pointwise
/// product and one inverse transform. Transform failures land in the task's
/// result slot and surface after the join.
fn modular_convolution<P: Parallelizer>(
    a: &Polynomial<i64>,
    b: &Polynomial<i64>,
    p: i64,
    out: &mut [i64],
    parallelizer: &P,
) -> Result<(), MultiplyError> {
    let n = out.len();
    let g = primitive_root_mod_prime(p);

    let mut padded_a = vec![0; n];
    padded_a[..a.degree() + 1].copy_from_slice(a.coefficients());
    let mut padded_b = vec![0; n];
    padded_b[..b.degree() + 1].copy_from_slice(b.coefficients());

    let mut evals_a = vec![0; n];
    let mut evals_b = vec![0; n];
    let mut forward_a = Ok(());
    let mut forward_b = Ok(());
    {
        let tasks: Vec<Task> = vec![
            Box::new(|| forward_a = modular::ntt_into(&padded_a, &mut evals_a, p, g)),
            Box::new(|| forward_b = modular::ntt_into(&padded_b, &mut evals_b, p, g)),
        ];
        parallelizer.parallel_calls(tasks);
    }
    forward_a?;
    forward_b?;

    for ((value, &x), &y) in out.iter_mut().zip(&evals_a).zip(&evals_b) {
        *value = x * y % p;
    }
    modular::intt_in_place(out, p, g)?;
    Ok(())
}
