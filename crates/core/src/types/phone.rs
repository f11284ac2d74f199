//! Customer phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input has the wrong number of characters.
    #[error("phone number must be exactly {expected} digits (got {actual})")]
    InvalidLength {
        /// Required number of digits.
        expected: usize,
        /// Number of characters supplied.
        actual: usize,
    },
    /// The input contains something other than ASCII digits.
    #[error("phone number must contain only digits")]
    NonDigit,
}

/// A local mobile phone number.
///
/// ## Constraints
///
/// - Exactly 10 ASCII digits (e.g. `0555123456`)
/// - Surrounding whitespace is ignored
///
/// ## Examples
///
/// ```
/// use souq_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("0555123456").is_ok());
/// assert!(PhoneNumber::parse(" 0661234567 ").is_ok());
///
/// assert!(PhoneNumber::parse("").is_err());           // empty
/// assert!(PhoneNumber::parse("055512345").is_err());  // too short
/// assert!(PhoneNumber::parse("05551234ab").is_err()); // not digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Number of digits in a valid phone number.
    pub const DIGITS: usize = 10;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, is not exactly
    /// [`Self::DIGITS`] characters long, or contains non-digit characters.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let actual = s.chars().count();
        if actual != Self::DIGITS {
            return Err(PhoneError::InvalidLength {
                expected: Self::DIGITS,
                actual,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
