//! # shamir-pool
//!
//! shamir threshold secret sharing over a small prime field.
//!
//! a secret `s < p` becomes the constant term of a random polynomial of
//! degree `threshold - 1`. share `x` is the point `(x, f(x) mod p)`. any
//! `threshold` shares pin down the polynomial via lagrange interpolation,
//! while fewer leave every secret equally likely.
//!
//! ```text
//!   secret ──► polynomial ──► (1, y1) (2, y2) ... (n, yn)
//!                                   │
//!               any k shares ───────┘
//!                     │ lagrange at x = 0
//!                     ▼
//!                   secret
//! ```
//!
//! ## field
//!
//! values are `u64` with `u128`/`i128` intermediates, so any prime below
//! `2^64` works. [`DEFAULT_PRIME`] (10007) covers the diceware and
//! recovery-code domains in [`encoding`]. splitting and recovering must use
//! the same [`FieldConfig`].
//!
//! ## usage
//!
//! ```rust
//! use shamir_pool::{recover, split, FieldConfig};
//!
//! let field = FieldConfig::default();
//! let shares = split(1234, 3, 5, &field)?;
//!
//! let subset = [shares[0], shares[2], shares[4]];
//! assert_eq!(recover(&subset, &field)?, 1234);
//! # Ok::<(), shamir_pool::Error>(())
//! ```

pub mod encoding;
pub mod error;
pub mod field;
pub mod polynomial;
pub mod recover;
pub mod share;
pub mod split;

pub use error::{Error, Result};
pub use field::{extended_gcd, modular_div, modular_inverse, FieldConfig, DEFAULT_PRIME};
pub use polynomial::{evaluate, random_polynomial, Polynomial};
pub use recover::{interpolate_at, recover, recover_share, MIN_SHARES};
pub use share::{Share, ShareSet};
pub use split::{split, split_with_rng};
