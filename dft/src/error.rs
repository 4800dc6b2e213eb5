use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("transform length {len} is not a power of two")]
    NotPowerOfTwo { len: usize },

    #[error("source length {src} does not match destination length {dst}")]
    LengthMismatch { src: usize, dst: usize },

    #[error("modulus {p} is not prime")]
    ModulusNotPrime { p: i64 },

    #[error("modulus {p} is not congruent to 1 modulo the transform length {n}")]
    ModulusNotCongruent { p: i64, n: usize },

    #[error("{g} does not generate an order-{n} root of unity modulo {p}")]
    NotPrimitiveRoot { g: i64, p: i64, n: usize },
}
