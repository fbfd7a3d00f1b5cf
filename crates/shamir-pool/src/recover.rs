//! Secret recovery by Lagrange interpolation
//!
//! Given k points (x_i, y_i) on a polynomial of degree < k, its value at x is
//!
//! f(x) = Σ_i y_i · N_i / D_i
//!
//! Where:
//! - N_i = Π_{j ≠ i} (x - x_j)
//! - D_i = Π_{j ≠ i} (x_i - x_j)
//!
//! Every term is scaled by the common denominator D = Π_i D_i, so the sum
//! is formed as
//!
//! f(x) = (Σ_i (N_i · D · y_i) / D_i) / D
//!
//! and the result is divided by D once at the end.
//!
//! Shares that were not produced by one split give a meaningless value.
//! This cannot be detected from the points alone.

use tracing::{debug, trace};

use crate::field::FieldConfig;
use crate::share::Share;
use crate::{Error, Result};

/// Minimum number of shares `recover` accepts.
///
/// One point already determines a constant polynomial, but a pool with
/// threshold 1 shares nothing, so recovery always asks for two.
pub const MIN_SHARES: usize = 2;

/// Recover the secret (the polynomial's value at zero) from shares.
///
/// Shares may be given in any order. All shares are used, so supplying more
/// than the threshold is fine as long as they come from the same split.
pub fn recover(shares: &[Share], field: &FieldConfig) -> Result<u64> {
    validate_shares(shares)?;
    let secret = interpolate_at(0, shares, field)?;
    debug!(shares = shares.len(), prime = field.prime(), "recovered secret");
    Ok(secret)
}

/// Rebuild the share at index `x` from existing shares.
///
/// Lets a lost share be reissued without reconstructing the polynomial.
pub fn recover_share(shares: &[Share], x: u64, field: &FieldConfig) -> Result<Share> {
    if x == 0 {
        return Err(Error::InvalidShareIndex);
    }
    validate_shares(shares)?;
    let y = interpolate_at(x, shares, field)?;
    Ok(Share::new(x, y))
}

fn validate_shares(shares: &[Share]) -> Result<()> {
    if shares.len() < MIN_SHARES {
        return Err(Error::InsufficientShares {
            have: shares.len(),
            need: MIN_SHARES,
        });
    }
    if shares.iter().any(|s| s.x == 0) {
        return Err(Error::InvalidShareIndex);
    }
    Ok(())
}

/// Evaluate the unique polynomial of degree < k through `points` at `x`.
///
/// Needs at least one point and pairwise distinct x-coordinates. Unlike
/// [`recover`], points at x = 0 are accepted. Two x-coordinates that differ
/// but are congruent modulo p make a denominator vanish and fail with
/// [`Error::Arithmetic`].
pub fn interpolate_at(x: u64, points: &[Share], field: &FieldConfig) -> Result<u64> {
    let k = points.len();
    if k == 0 {
        return Err(Error::InsufficientShares { have: 0, need: 1 });
    }

    // Check for duplicates
    let mut xs: Vec<u64> = points.iter().map(|p| p.x).collect();
    xs.sort_unstable();
    for pair in xs.windows(2) {
        if pair[0] == pair[1] {
            return Err(Error::DuplicateShare(pair[0]));
        }
    }

    let mut nums = Vec::with_capacity(k);
    let mut dens = Vec::with_capacity(k);
    for (i, cur) in points.iter().enumerate() {
        let mut num = 1u64;
        let mut den = 1u64;
        for (j, other) in points.iter().enumerate() {
            if i != j {
                num = field.mul(num, field.sub(x, other.x));
                den = field.mul(den, field.sub(cur.x, other.x));
            }
        }
        nums.push(num);
        dens.push(den);
    }

    let den = dens.iter().fold(1u64, |acc, d| field.mul(acc, *d));

    let mut num = 0u64;
    for ((n_i, d_i), point) in nums.iter().zip(&dens).zip(points) {
        let scaled = field.mul(field.mul(*n_i, den), field.reduce(point.y));
        num = field.add(num, field.div(scaled, *d_i)?);
    }

    trace!(points = k, "lagrange interpolation complete");
    field.div(num, den)
}
