//! share types and text format
//!
//! a share set is written as an ordered list of `(x, y)` tuples:
//!
//! ```text
//! [(1, 4231), (2, 9120), (3, 77)]
//! ```
//!
//! no framing, checksum or version is attached. with the `serde` feature a
//! share serializes as the two-element tuple `[x, y]`.

use core::fmt;
use core::ops::Deref;
use core::str::FromStr;

use crate::{Error, Result};

/// one point `(x, y)` on a pool polynomial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "(u64, u64)", into = "(u64, u64)")
)]
pub struct Share {
    /// share index (1-indexed, x = 0 is the secret itself)
    pub x: u64,
    /// polynomial value at x
    pub y: u64,
}

impl Share {
    pub fn new(x: u64, y: u64) -> Self {
        Self { x, y }
    }
}

impl From<(u64, u64)> for Share {
    fn from((x, y): (u64, u64)) -> Self {
        Self { x, y }
    }
}

impl From<Share> for (u64, u64) {
    fn from(share: Share) -> Self {
        (share.x, share.y)
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// shares derived from one polynomial, ordered by x
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ShareSet(Vec<Share>);

impl ShareSet {
    pub fn new(shares: Vec<Share>) -> Self {
        Self(shares)
    }

    pub fn as_slice(&self) -> &[Share] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Share> {
        self.0
    }

    /// share at index x, if present
    pub fn get_by_index(&self, x: u64) -> Option<&Share> {
        self.0.iter().find(|s| s.x == x)
    }
}

impl Deref for ShareSet {
    type Target = [Share];

    fn deref(&self) -> &[Share] {
        &self.0
    }
}

impl From<Vec<Share>> for ShareSet {
    fn from(shares: Vec<Share>) -> Self {
        Self(shares)
    }
}

impl FromIterator<Share> for ShareSet {
    fn from_iter<I: IntoIterator<Item = Share>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ShareSet {
    type Item = Share;
    type IntoIter = std::vec::IntoIter<Share>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ShareSet {
    type Item = &'a Share;
    type IntoIter = core::slice::Iter<'a, Share>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ShareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, share) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", share)?;
        }
        f.write_str("]")
    }
}

impl FromStr for ShareSet {
    type Err = Error;

    /// parse `[(x, y), ...]`; the brackets are optional
    fn from_str(s: &str) -> Result<Self> {
        let mut body = s.trim();
        if let Some(inner) = body.strip_prefix('[') {
            body = inner
                .strip_suffix(']')
                .ok_or_else(|| invalid("unterminated share list"))?;
        }

        let mut shares = Vec::new();
        let mut rest = body.trim_start();
        while !rest.is_empty() {
            let tuple = rest
                .strip_prefix('(')
                .ok_or_else(|| invalid(format!("expected '(' at {:?}", rest)))?;
            let close = tuple
                .find(')')
                .ok_or_else(|| invalid("unterminated share tuple"))?;
            shares.push(parse_pair(&tuple[..close])?);

            rest = tuple[close + 1..].trim_start();
            if let Some(after) = rest.strip_prefix(',') {
                rest = after.trim_start();
            } else if !rest.is_empty() {
                return Err(invalid(format!("expected ',' at {:?}", rest)));
            }
        }

        Ok(Self(shares))
    }
}

fn parse_pair(pair: &str) -> Result<Share> {
    let mut parts = pair.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid(format!("expected two integers in ({})", pair)));
    };
    Ok(Share::new(parse_int(x)?, parse_int(y)?))
}

fn parse_int(s: &str) -> Result<u64> {
    let s = s.trim();
    s.parse()
        .map_err(|_| invalid(format!("{:?} is not a non-negative integer", s)))
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidShareFormat(msg.into())
}
