//! Dense polynomials over a numeric coefficient type, with naive,
//! complex-FFT and exact NTT+CRT multiplication strategies.
//!
//! A polynomial is its coefficient vector, lowest degree first. The vector
//! either holds exactly one element (the zero polynomial, with coefficient
//! zero and degree zero by convention) or ends in a nonzero coefficient.
//! Polynomials are immutable; every operation returns a fresh value.

mod multiply;

pub use multiply::{
    complex_multiply, integer_multiply, naive_multiply, real_multiply, MultiplyError,
    MIN_NTT_EXPONENT, NAIVE_FALLBACK_THRESHOLD,
};

use {
    num_traits::Zero,
    std::{
        fmt,
        ops::{Add, Div, Mul, Neg, Sub},
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial<T> {
    coefficients: Vec<T>,
}

impl<T: Zero> Polynomial<T> {
    /// Builds a polynomial from coefficients, trimming trailing zeros down
    /// to the zero-polynomial convention.
    pub fn new(mut coefficients: Vec<T>) -> Self {
        while coefficients.len() > 1 && matches!(coefficients.last(), Some(c) if c.is_zero()) {
            coefficients.pop();
        }
        if coefficients.is_empty() {
            coefficients.push(T::zero());
        }
        Self { coefficients }
    }

    pub fn zero() -> Self {
        Self {
            coefficients: vec![T::zero()],
        }
    }

    pub fn constant(value: T) -> Self {
        Self::new(vec![value])
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.len() == 1 && self.coefficients[0].is_zero()
    }
}

impl<T> Polynomial<T> {
    /// Degree of the polynomial; the zero polynomial has degree zero.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    pub fn into_coefficients(self) -> Vec<T> {
        self.coefficients
    }
}

impl<T: Copy + Zero> Polynomial<T> {
    /// Coefficient of `X^i`; zero beyond the degree.
    pub fn coefficient(&self, i: usize) -> T {
        self.coefficients.get(i).copied().unwrap_or_else(T::zero)
    }
}

impl<T: Copy + Zero> Add for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn add(self, other: &Polynomial<T>) -> Polynomial<T> {
        let len = self.coefficients.len().max(other.coefficients.len());
        Polynomial::new(
            (0..len)
                .map(|i| self.coefficient(i) + other.coefficient(i))
                .collect(),
        )
    }
}

impl<T: Copy + Zero + Sub<Output = T>> Sub for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn sub(self, other: &Polynomial<T>) -> Polynomial<T> {
        let len = self.coefficients.len().max(other.coefficients.len());
        Polynomial::new(
            (0..len)
                .map(|i| self.coefficient(i) - other.coefficient(i))
                .collect(),
        )
    }
}

impl<T: Copy + Zero + Neg<Output = T>> Neg for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn neg(self) -> Polynomial<T> {
        Polynomial::new(self.coefficients.iter().map(|&c| -c).collect())
    }
}

/// Scaling by zero collapses to the zero polynomial; scaling by anything
/// else preserves the degree exactly.
impl<T: Copy + Zero + Mul<Output = T>> Mul<T> for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, scalar: T) -> Polynomial<T> {
        if scalar.is_zero() {
            return Polynomial::zero();
        }
        Polynomial {
            coefficients: self.coefficients.iter().map(|&c| c * scalar).collect(),
        }
    }
}

/// Division by zero also collapses to the zero polynomial, mirroring the
/// scaling convention.
impl<T: Copy + Zero + Div<Output = T>> Div<T> for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn div(self, scalar: T) -> Polynomial<T> {
        if scalar.is_zero() {
            return Polynomial::zero();
        }
        Polynomial {
            coefficients: self.coefficients.iter().map(|&c| c / scalar).collect(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Polynomial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coefficient) in self.coefficients.iter().enumerate() {
            match i {
                0 => write!(f, "{coefficient}")?,
                1 => write!(f, " + {coefficient}X")?,
                _ => write!(f, " + {coefficient}X^{i}")?,
            }
        }
        Ok(())
    }
}
