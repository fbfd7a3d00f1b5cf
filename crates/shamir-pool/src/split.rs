//! split a secret into a pool of shares
//!
//! every parameter is validated before the generator is touched, so a
//! rejected call consumes no randomness.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use tracing::debug;

use crate::field::FieldConfig;
use crate::polynomial::random_polynomial;
use crate::share::{Share, ShareSet};
use crate::{Error, Result};

/// split `secret` into `total` shares, any `threshold` of which recover it
///
/// randomness comes from the operating system.
pub fn split(secret: u64, threshold: usize, total: usize, field: &FieldConfig) -> Result<ShareSet> {
    split_with_rng(secret, threshold, total, field, &mut OsRng)
}

/// split with an explicit secure generator
///
/// consumes exactly `threshold - 1` field draws from `rng`. shares are
/// evaluated at `x = 1..=total`.
pub fn split_with_rng<R: RngCore + CryptoRng>(
    secret: u64,
    threshold: usize,
    total: usize,
    field: &FieldConfig,
    rng: &mut R,
) -> Result<ShareSet> {
    validate(secret, threshold, total, field)?;

    let poly = random_polynomial(secret, threshold - 1, field, rng)?;
    let shares: ShareSet = (1..=total as u64)
        .map(|x| Share::new(x, poly.evaluate(x, field)))
        .collect();

    debug!(threshold, total, prime = field.prime(), "split secret into shares");
    Ok(shares)
}

fn validate(secret: u64, threshold: usize, total: usize, field: &FieldConfig) -> Result<()> {
    if threshold == 0 || threshold > total {
        return Err(Error::InvalidThreshold { threshold, total });
    }
    // x-coordinates 1..=total must stay distinct modulo p
    if total as u128 >= field.prime() as u128 {
        return Err(Error::TooManyShares {
            total,
            prime: field.prime(),
        });
    }
    if secret >= field.prime() {
        return Err(Error::SecretOutOfRange {
            secret,
            limit: field.prime(),
        });
    }
    Ok(())
}
