//! Integer arithmetic underpinning the number-theoretic transform: modular
//! exponentiation, primality tests, prime search in arithmetic progressions,
//! primitive roots, modular inverses and Chinese remainder reconstruction.
//!
//! Everything works on `i64`. Moduli are capped at [`MAX_NTT_MODULUS`] so a
//! product of two reduced residues always fits the word.

use {thiserror::Error, tracing::debug};

/// Largest modulus the transforms accept. With `p <= 2^31` the product of
/// two residues in `[0, p)` stays below `2^62`.
pub const MAX_NTT_MODULUS: i64 = 1 << 31;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberTheoryError {
    #[error("remainder and modulus vectors have different lengths ({remainders} vs {moduli})")]
    LengthMismatch { remainders: usize, moduli: usize },

    #[error("{value} has no inverse modulo {modulus}; the arguments are not coprime")]
    NotCoprime { value: i64, modulus: i64 },

    #[error("prime search candidate {candidate} exceeds the safe modulus bound {bound}")]
    CandidateOverflow { candidate: i64, bound: i64 },
}

/// `a mod m` mapped into `[0, m)` regardless of the sign of `a`.
pub const fn safe_mod(a: i64, m: i64) -> i64 {
    ((a % m) + m) % m
}

/// `base^exponent mod modulus` by binary exponentiation, in `[0, modulus)`.
///
/// Requires `exponent >= 0` and `0 < modulus <= MAX_NTT_MODULUS`.
pub fn mod_pow(base: i64, exponent: i64, modulus: i64) -> i64 {
    debug_assert!(exponent >= 0);
    debug_assert!(0 < modulus && modulus <= MAX_NTT_MODULUS);

    let mut base = safe_mod(base, modulus);
    let mut exponent = exponent;
    let mut remainder = 1;
    while exponent != 0 {
        if exponent % 2 == 1 {
            remainder = remainder * base % modulus;
        }
        base = base * base % modulus;
        exponent /= 2;
    }
    remainder
}

/// Deterministic primality check by trial division up to `sqrt(n)`.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Fermat test with base 2: `false` means certainly composite, `true` means
/// probably prime. Even numbers are reported composite.
pub fn is_probably_prime(n: i64) -> bool {
    if n < 2 || n % 2 == 0 {
        return false;
    }
    mod_pow(2, n - 1, n) == 1
}

/// First prime in the arithmetic progression `{k*n + 1 : k >= 1}`.
pub fn find_prime_in_ap(n: i64) -> Result<i64, NumberTheoryError> {
    find_primes_in_ap(n, 1).map(|primes| primes[0])
}

/// First `count` primes in the arithmetic progression `{k*n + 1 : k >= 1}`.
///
/// Dirichlet guarantees infinitely many, but the search fails with
/// [`NumberTheoryError::CandidateOverflow`] as soon as a candidate passes
/// [`MAX_NTT_MODULUS`], keeping every returned prime safe for `i64`
/// butterfly arithmetic. Candidates are filtered by the cheap Fermat test
/// before the trial-division confirmation.
pub fn find_primes_in_ap(n: i64, count: usize) -> Result<Vec<i64>, NumberTheoryError> {
    let mut primes = Vec::with_capacity(count);
    let mut candidate = n + 1;
    while primes.len() < count {
        if candidate > MAX_NTT_MODULUS {
            return Err(NumberTheoryError::CandidateOverflow {
                candidate,
                bound: MAX_NTT_MODULUS,
            });
        }
        if is_probably_prime(candidate) && is_prime(candidate) {
            debug!(prime = candidate, modulus_of_progression = n, "prime found");
            primes.push(candidate);
        }
        candidate += n;
    }
    Ok(primes)
}

/// Prime factors of `n` in ascending order, repeated per multiplicity.
pub fn prime_divisors_with_multiplicity(n: i64) -> Vec<i64> {
    let mut remaining = n;
    let mut divisors = Vec::new();
    let mut p = 2;
    while p * p <= remaining {
        while remaining % p == 0 {
            divisors.push(p);
            remaining /= p;
        }
        p += 1;
    }
    if remaining > 1 {
        divisors.push(remaining);
    }
    divisors
}

/// Distinct prime factors of `n` in ascending order.
pub fn prime_divisors(n: i64) -> Vec<i64> {
    let mut divisors = prime_divisors_with_multiplicity(n);
    divisors.dedup();
    divisors
}

/// Smallest primitive root modulo the prime `p`.
///
/// `g` generates the multiplicative group iff `g^((p-1)/q) != 1` for every
/// prime `q` dividing `p - 1`.
pub fn primitive_root_mod_prime(p: i64) -> i64 {
    debug_assert!(is_prime(p));

    let divisors = prime_divisors(p - 1);
    for g in 1..p {
        if divisors.iter().all(|q| mod_pow(g, (p - 1) / q, p) != 1) {
            return g;
        }
    }
    unreachable!("every prime has a primitive root")
}

/// Multiplicative inverse of `value` modulo `modulus`, in `[0, modulus)`.
pub fn modular_inverse(value: i64, modulus: i64) -> Result<i64, NumberTheoryError> {
    let (gcd, coefficient, _) = extended_gcd(safe_mod(value, modulus), modulus);
    if gcd != 1 {
        return Err(NumberTheoryError::NotCoprime { value, modulus });
    }
    Ok(safe_mod(coefficient, modulus))
}

/// Returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`.
fn extended_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (gcd, x, y) = extended_gcd(b, a % b);
        (gcd, y, x - (a / b) * y)
    }
}

/// Chinese remainder reconstruction.
///
/// For pairwise coprime `moduli` and matching `remainders`, returns the
/// unique `r` in `[0, prod(moduli))` with `r = remainders[i] (mod moduli[i])`
/// for every `i`. The moduli are folded in pairwise, so the running product
/// must stay within `i64`; the NTT pipeline only ever combines two primes
/// below [`MAX_NTT_MODULUS`].
pub fn crt(remainders: &[i64], moduli: &[i64]) -> Result<i64, NumberTheoryError> {
    if remainders.len() != moduli.len() {
        return Err(NumberTheoryError::LengthMismatch {
            remainders: remainders.len(),
            moduli: moduli.len(),
        });
    }

    let mut remainder: i64 = 0;
    let mut modulus: i64 = 1;
    for (&r, &m) in remainders.iter().zip(moduli) {
        let inverse = modular_inverse(safe_mod(modulus, m), m)?;
        let difference = safe_mod(safe_mod(r, m) - remainder, m);
        remainder += modulus * safe_mod(difference * inverse, m);
        modulus *= m;
    }
    Ok(remainder)
}

#[cfg(test)]
mod tests {
    use {super::*, proptest::prelude::*, test_case::test_case};

    #[test]
    fn trial_division_matches_small_primes() {
        let primes = [2, 3, 5, 7, 11, 13, 17, 19, 23, 65537, 114689];
        for p in primes {
            assert!(is_prime(p), "{p} is prime");
        }
        for n in [-7, 0, 1, 4, 9, 15, 21, 65536, 114688] {
            assert!(!is_prime(n), "{n} is not prime");
        }
    }

    #[test]
    fn fermat_accepts_base_two_pseudoprimes() {
        // 341 = 11 * 31 is the smallest base-2 Fermat pseudoprime.
        assert!(is_probably_prime(341));
        assert!(!is_prime(341));
        // Even numbers and obvious composites are rejected outright.
        assert!(!is_probably_prime(4));
        assert!(!is_probably_prime(9));
    }

    #[test]
    fn prime_search_in_progression() {
        assert_eq!(find_prime_in_ap(8).unwrap(), 17);
        assert_eq!(find_primes_in_ap(1 << 14, 2).unwrap(), vec![65537, 114689]);
    }

    #[test]
    fn prime_search_stops_at_the_modulus_bound() {
        let err = find_primes_in_ap(MAX_NTT_MODULUS, 1).unwrap_err();
        assert!(matches!(err, NumberTheoryError::CandidateOverflow { .. }));
    }

    #[test]
    fn factorization_of_composites() {
        assert_eq!(prime_divisors_with_multiplicity(360), vec![2, 2, 2, 3, 3, 5]);
        assert_eq!(prime_divisors(360), vec![2, 3, 5]);
        assert_eq!(prime_divisors(114688), vec![2, 7]);
        assert!(prime_divisors(1).is_empty());
    }

    #[test_case(2 => 1)]
    #[test_case(3 => 2)]
    #[test_case(17 => 3)]
    #[test_case(2017 => 5)]
    #[test_case(65537 => 3)]
    fn smallest_primitive_root(p: i64) -> i64 {
        primitive_root_mod_prime(p)
    }

    #[test]
    fn primitive_root_has_full_order() {
        for p in [5, 13, 97, 114689] {
            let g = primitive_root_mod_prime(p);
            for q in prime_divisors(p - 1) {
                assert_ne!(mod_pow(g, (p - 1) / q, p), 1);
            }
        }
    }

    #[test]
    fn inverse_agrees_with_fermat_exponentiation() {
        let primes = [2, 3, 5, 7, 11, 13, 17, 19, 2017, 65537, 163841, 557057];
        let values = [
            1,
            2,
            4,
            7,
            8,
            25903,
            19251,
            557054,
            65537 * 163841,
            163841 * 557057,
            -3,
            -5,
            -9,
        ];
        for p in primes {
            for r in values {
                if safe_mod(r, p) == 0 {
                    continue;
                }
                assert_eq!(modular_inverse(r, p).unwrap(), mod_pow(r, p - 2, p));
            }
        }
    }

    #[test]
    fn inverse_of_non_coprime_arguments_fails() {
        assert_eq!(
            modular_inverse(6, 9),
            Err(NumberTheoryError::NotCoprime {
                value: 6,
                modulus: 9
            })
        );
    }

    #[test]
    fn crt_reproduces_every_residue() {
        let remainders = [1, 2, 4, 3, 8, -3, -3];
        let moduli = [2, 3, 5, 7, 11, 65537, 163841];
        let r = crt(&remainders, &moduli).unwrap();
        for (&want, &m) in remainders.iter().zip(&moduli) {
            assert_eq!(safe_mod(r, m), safe_mod(want, m));
        }

        let r = crt(&[65534, 163838], &[65537, 163841]).unwrap();
        assert_eq!(safe_mod(r, 65537), 65534);
        assert_eq!(safe_mod(r, 163841), 163838);
    }

    #[test]
    fn crt_rejects_mismatched_inputs() {
        assert!(matches!(
            crt(&[1, 2], &[3]),
            Err(NumberTheoryError::LengthMismatch { .. })
        ));
        assert!(matches!(
            crt(&[1, 2], &[4, 6]),
            Err(NumberTheoryError::NotCoprime { .. })
        ));
    }

    proptest! {
        #[test]
        fn mod_pow_matches_iterated_multiplication(
            base in -100_i64..100,
            exponent in 0_i64..24,
            modulus in 2_i64..10_000,
        ) {
            let mut expected = 1_i64;
            for _ in 0..exponent {
                expected = expected * safe_mod(base, modulus) % modulus;
            }
            prop_assert_eq!(mod_pow(base, exponent, modulus), expected);
        }

        #[test]
        fn crt_on_fixed_coprime_moduli(
            r0 in -1_000_i64..1_000,
            r1 in -1_000_i64..1_000,
            r2 in -1_000_i64..1_000,
        ) {
            let moduli = [17, 256, 4095];
            let r = crt(&[r0, r1, r2], &moduli).unwrap();
            prop_assert!(r >= 0 && r < moduli.iter().product::<i64>());
            prop_assert_eq!(safe_mod(r, moduli[0]), safe_mod(r0, moduli[0]));
            prop_assert_eq!(safe_mod(r, moduli[1]), safe_mod(r1, moduli[1]));
            prop_assert_eq!(safe_mod(r, moduli[2]), safe_mod(r2, moduli[2]));
        }
    }
}
