//! error types for shamir-pool

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // === parameter errors ===
    #[error("threshold {threshold} invalid for {total} shares, pool secret would be irrecoverable")]
    InvalidThreshold { threshold: usize, total: usize },

    #[error("secret {secret} out of range (must be below {limit})")]
    SecretOutOfRange { secret: u64, limit: u64 },

    #[error("modulus {0} is not prime")]
    InvalidPrime(u64),

    #[error("too many shares: {total} x-coordinates do not fit below prime {prime}")]
    TooManyShares { total: usize, prime: u64 },

    // === recovery errors ===
    #[error("not enough shares: have {have}, need {need}")]
    InsufficientShares { have: usize, need: usize },

    #[error("duplicate share index: {0}")]
    DuplicateShare(u64),

    #[error("share index must be greater than 0")]
    InvalidShareIndex,

    #[error("{value} has no inverse modulo {modulus}")]
    Arithmetic { value: u64, modulus: u64 },

    // === encoding errors ===
    #[error("invalid share format: {0}")]
    InvalidShareFormat(String),

    #[error("invalid dice index {0:?} (expected five digits 1-6)")]
    InvalidDiceIndex(String),

    #[error("invalid recovery char {0:?} (expected one of A-Z, 0-9)")]
    InvalidRecoveryChar(String),
}

impl Error {
    /// Whether the error stems from bad call parameters rather than bad
    /// share data.
    pub fn is_caller_bug(&self) -> bool {
        matches!(
            self,
            Self::InvalidThreshold { .. }
                | Self::SecretOutOfRange { .. }
                | Self::InvalidPrime(_)
                | Self::TooManyShares { .. }
                | Self::Arithmetic { .. }
        )
    }
}
