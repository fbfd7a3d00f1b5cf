//! mapping human-facing secrets into the integer domain
//!
//! two domains are supported:
//!
//! - diceware indices: five rolls of a six-sided die, e.g. `"35214"`. read
//!   as a base-6 number (each digit minus one) this gives `0..7776`.
//! - recovery-code chars: one of `A-Z` or `0-9`, mapped to its position in
//!   [`RECOVERY_ALPHABET`].
//!
//! both fit below [`crate::DEFAULT_PRIME`].

use std::collections::BTreeMap;

use crate::{Error, Result};

/// number of dice in a diceware index
pub const DICE_PER_INDEX: usize = 5;

/// number of distinct diceware indices (6^5)
pub const DICEWARE_SPACE: u64 = 7776;

/// recovery-code symbols, in index order
pub const RECOVERY_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `"11111"` -> 0, `"66666"` -> 7775
pub fn dice_index_to_secret(index: &str) -> Result<u64> {
    let bytes = index.as_bytes();
    if bytes.len() != DICE_PER_INDEX || !bytes.iter().all(|b| (b'1'..=b'6').contains(b)) {
        return Err(Error::InvalidDiceIndex(index.to_string()));
    }
    Ok(bytes
        .iter()
        .fold(0u64, |acc, &b| acc * 6 + u64::from(b - b'1')))
}

/// inverse of [`dice_index_to_secret`]
pub fn secret_to_dice_index(secret: u64) -> Result<String> {
    if secret >= DICEWARE_SPACE {
        return Err(Error::SecretOutOfRange {
            secret,
            limit: DICEWARE_SPACE,
        });
    }

    let mut digits = [b'1'; DICE_PER_INDEX];
    let mut rest = secret;
    for digit in digits.iter_mut().rev() {
        *digit = b'1' + (rest % 6) as u8;
        rest /= 6;
    }
    Ok(digits.iter().map(|&d| d as char).collect())
}

pub fn recovery_char_to_secret(code: &str) -> Result<u64> {
    let mut chars = code.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(Error::InvalidRecoveryChar(code.to_string()));
    };
    RECOVERY_ALPHABET
        .chars()
        .position(|a| a == c)
        .map(|i| i as u64)
        .ok_or_else(|| Error::InvalidRecoveryChar(code.to_string()))
}

pub fn secret_to_recovery_char(secret: u64) -> Result<char> {
    let limit = RECOVERY_ALPHABET.len() as u64;
    RECOVERY_ALPHABET
        .chars()
        .nth(secret as usize)
        .filter(|_| secret < limit)
        .ok_or(Error::SecretOutOfRange { secret, limit })
}

/// parse a diceware word list of `<index> <word>` lines
///
/// lines without both columns are skipped.
pub fn parse_wordlist(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let mut cols = line.split_whitespace();
            Some((cols.next()?.to_string(), cols.next()?.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_index_bounds() {
        assert_eq!(dice_index_to_secret("11111").unwrap(), 0);
        assert_eq!(dice_index_to_secret("11112").unwrap(), 1);
        assert_eq!(dice_index_to_secret("11121").unwrap(), 6);
        assert_eq!(dice_index_to_secret("66666").unwrap(), 7775);
    }

    #[test]
    fn test_dice_index_whole_space() {
        for secret in 0..DICEWARE_SPACE {
            let index = secret_to_dice_index(secret).unwrap();
            assert_eq!(index.len(), DICE_PER_INDEX);
            assert_eq!(dice_index_to_secret(&index).unwrap(), secret);
        }
    }

    #[test]
    fn test_dice_index_invalid() {
        for bad in ["", "1111", "111111", "11171", "01111", "1111a", "１１１１１"] {
            assert!(
                matches!(dice_index_to_secret(bad), Err(Error::InvalidDiceIndex(_))),
                "{:?} should be rejected",
                bad
            );
        }
        assert_eq!(
            secret_to_dice_index(7776).unwrap_err(),
            Error::SecretOutOfRange { secret: 7776, limit: 7776 }
        );
    }

    #[test]
    fn test_recovery_alphabet() {
        assert_eq!(recovery_char_to_secret("A").unwrap(), 0);
        assert_eq!(recovery_char_to_secret("Z").unwrap(), 25);
        assert_eq!(recovery_char_to_secret("0").unwrap(), 26);
        assert_eq!(recovery_char_to_secret("9").unwrap(), 35);

        for (i, c) in RECOVERY_ALPHABET.chars().enumerate() {
            assert_eq!(secret_to_recovery_char(i as u64).unwrap(), c);
        }
    }

    #[test]
    fn test_recovery_char_invalid() {
        for bad in ["", "a", "AB", "-", " "] {
            assert!(matches!(
                recovery_char_to_secret(bad),
                Err(Error::InvalidRecoveryChar(_))
            ));
        }
        assert_eq!(
            secret_to_recovery_char(36).unwrap_err(),
            Error::SecretOutOfRange { secret: 36, limit: 36 }
        );
    }

    #[test]
    fn test_parse_wordlist() {
        let list = parse_wordlist("11111\tabacus\n11112 abdomen\n\nbroken\n66666 zoom extra\n");
        assert_eq!(list.len(), 3);
        assert_eq!(list["11111"], "abacus");
        assert_eq!(list["11112"], "abdomen");
        assert_eq!(list["66666"], "zoom");
    }
}
