//! Discrete Fourier Transform engines over `Complex64`, and their
//! number-theoretic sibling over prime fields.
//!
//! Three interchangeable engines compute the same transform: [`naive`]
//! (`O(N^2)`, any length), [`recursive`] and [`iterative`] (radix-2
//! Cooley-Tukey, `O(N log N)`, power-of-two lengths). The [`parallel`]
//! module provides the same engines parameterized over a
//! [`Parallelizer`](fourier_parallel::Parallelizer), and [`modular`] computes
//! the transform in `F_p` for primes `p = 1 (mod N)`.
//!
//! Every engine offers `*_into` (distinct source and destination) and
//! `*_in_place` shapes; inverse transforms apply the `1/N` scaling.

mod driver;
pub mod error;
pub mod iterative;
pub mod modular;
pub mod naive;
pub mod parallel;
pub mod recursive;
pub mod utils;

pub use {error::TransformError, num_complex::Complex64, recursive::RECURSIVE_BASE_CASE};
