//! prime field arithmetic
//!
//! All values live in `[0, p)` for a fixed prime `p < 2^64`. Products are
//! taken in `u128` and the extended euclidean algorithm runs over `i128`,
//! so no intermediate can overflow for any supported prime.
//!
//! Division is multiplication by the inverse of the denominator, where the
//! inverse of `a` is the `b` with `a * b % p == 1`. The inverse comes from
//! the bezout coefficients of `gcd(a, p) = 1`.

use crate::{Error, Result};

/// field modulus used when none is configured. large enough for both the
/// diceware domain (7776 values) and the recovery-code alphabet.
pub const DEFAULT_PRIME: u64 = 10007;

/// miller-rabin witnesses, deterministic for every n < 3.3 * 10^24
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// the field every split and recover operation runs in
///
/// split and recover must use the same config: recovering with a different
/// prime yields a wrong value that cannot be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldConfig {
    prime: u64,
}

impl FieldConfig {
    /// create a field config, rejecting composite moduli
    pub fn new(prime: u64) -> Result<Self> {
        if !is_prime(prime) {
            return Err(Error::InvalidPrime(prime));
        }
        Ok(Self { prime })
    }

    #[inline]
    pub fn prime(&self) -> u64 {
        self.prime
    }

    #[inline]
    pub fn reduce(&self, value: u64) -> u64 {
        value % self.prime
    }

    #[inline]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        ((a as u128 + b as u128) % self.prime as u128) as u64
    }

    #[inline]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        let (a, b) = (self.reduce(a), self.reduce(b));
        if a >= b {
            a - b
        } else {
            self.prime - (b - a)
        }
    }

    #[inline]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        mul_mod(a, b, self.prime)
    }

    pub fn inverse(&self, a: u64) -> Result<u64> {
        modular_inverse(a, self.prime)
    }

    pub fn div(&self, num: u64, den: u64) -> Result<u64> {
        modular_div(num, den, self.prime)
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            prime: DEFAULT_PRIME,
        }
    }
}

/// bezout coefficients `(x, y)` with `a*x + b*y = gcd(a, b)`, where the gcd
/// is non-negative
///
/// signs of `a` and `b` are arbitrary. magnitudes up to `u64::MAX` are
/// supported; beyond that the coefficient updates may overflow `i128`.
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128) {
    let (_, x, y) = egcd(a, b);
    (x, y)
}

/// returns `(gcd, x, y)` with `gcd >= 0`
fn egcd(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_x, mut x) = (1i128, 0i128);
    let (mut old_y, mut y) = (0i128, 1i128);

    while r != 0 {
        // a unit remainder ends the search; also avoids i128::MIN / -1
        if r == 1 || r == -1 {
            return (1, x * r, y * r);
        }
        let quot = old_r / r;
        (old_r, r) = (r, old_r - quot * r);
        (old_x, x) = (x, old_x - quot * x);
        (old_y, y) = (y, old_y - quot * y);
    }

    // truncating division leaves the sign of the inputs on the remainder
    if old_r < 0 {
        (-old_r, -old_x, -old_y)
    } else {
        (old_r, old_x, old_y)
    }
}

/// inverse of `a` modulo `p`
///
/// fails with [`Error::Arithmetic`] when `gcd(a, p) != 1`, which for a prime
/// modulus only happens for `a ≡ 0`.
pub fn modular_inverse(a: u64, p: u64) -> Result<u64> {
    if p < 2 {
        return Err(Error::Arithmetic { value: a, modulus: p });
    }
    let a = a % p;
    let (g, x, _) = egcd(a as i128, p as i128);
    if g != 1 {
        return Err(Error::Arithmetic { value: a, modulus: p });
    }
    // bezout coefficient may be negative
    let p = p as i128;
    Ok(((x % p + p) % p) as u64)
}

/// `num / den` modulo `p`, such that `den * result % p == num % p`
pub fn modular_div(num: u64, den: u64, p: u64) -> Result<u64> {
    let inv = modular_inverse(den, p)?;
    Ok(mul_mod(num % p, inv, p))
}

#[inline]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1u64 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// deterministic miller-rabin primality test over `u64`
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &w in &WITNESSES {
        if n % w == 0 {
            return n == w;
        }
    }

    let mut d = n - 1;
    let mut s = 0u32;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in &WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
