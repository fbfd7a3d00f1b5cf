//! random polynomials over the prime field
//!
//! A pool polynomial carries the secret as its constant term. The remaining
//! coefficients must come from a cryptographically secure generator: a
//! predictable coefficient lets fewer than `threshold` shares pin down the
//! secret.

use core::fmt;

use rand::Rng;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::field::FieldConfig;
use crate::{Error, Result};

/// Polynomial coefficients `[c_0 = secret, c_1, ..., c_{k-1}]`.
///
/// Lives only for the duration of a split. Coefficients are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Polynomial {
    coefficients: Vec<u64>,
}

impl Polynomial {
    /// Build from explicit coefficients, lowest degree first.
    ///
    /// Coefficients are reduced into the field. An empty list is the zero
    /// polynomial.
    pub fn from_coefficients(mut coefficients: Vec<u64>, field: &FieldConfig) -> Self {
        if coefficients.is_empty() {
            coefficients.push(0);
        }
        for c in coefficients.iter_mut() {
            *c = field.reduce(*c);
        }
        Self { coefficients }
    }

    /// The constant term, i.e. the shared secret.
    #[inline]
    pub fn constant_term(&self) -> u64 {
        self.coefficients[0]
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    #[inline]
    pub fn coefficients(&self) -> &[u64] {
        &self.coefficients
    }

    pub fn evaluate(&self, x: u64, field: &FieldConfig) -> u64 {
        evaluate(&self.coefficients, x, field)
    }
}

// keep coefficients out of logs
impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("degree", &self.degree())
            .field("coefficients", &"[REDACTED]")
            .finish()
    }
}

/// Generate a polynomial of the given degree with `secret` as constant term.
///
/// Draws exactly `degree` coefficients, each uniform over `[0, p)`. The
/// secret is range checked before the generator is touched.
pub fn random_polynomial<R: RngCore + CryptoRng>(
    secret: u64,
    degree: usize,
    field: &FieldConfig,
    rng: &mut R,
) -> Result<Polynomial> {
    let prime = field.prime();
    if secret >= prime {
        return Err(Error::SecretOutOfRange {
            secret,
            limit: prime,
        });
    }

    let mut coefficients = Vec::with_capacity(degree + 1);
    coefficients.push(secret);
    for _ in 0..degree {
        coefficients.push(rng.gen_range(0..prime));
    }

    Ok(Polynomial { coefficients })
}

/// Evaluate coefficients (lowest degree first) at `x` with horner's method.
///
/// Reduces after every step: `acc = (acc * x + c) mod p`.
pub fn evaluate(coefficients: &[u64], x: u64, field: &FieldConfig) -> u64 {
    let x = field.reduce(x);
    let mut acc = 0u64;
    for &coeff in coefficients.iter().rev() {
        acc = field.add(field.mul(acc, x), coeff);
    }
    acc
}
