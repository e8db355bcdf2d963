//! Validated Indian postal code (pincode) type.
//!
//! A [`Pincode`] is the cache key and the resolver input for the whole
//! pricing pipeline, so construction normalises and validates eagerly:
//! malformed input never reaches a cache tier or the network layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PINCODE_LEN: usize = 6;

/// A six-digit Indian postal code.
///
/// Construction strips ALL whitespace (interior included, so `"440 024"` is
/// accepted) and then requires exactly six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pincode(String);

impl Pincode {
    /// Normalise and validate a caller-supplied pincode string.
    ///
    /// # Errors
    /// Returns [`PincodeValidationError`] when the cleaned input is empty or
    /// is not exactly six digits.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, PincodeValidationError> {
        let cleaned: String = raw
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if cleaned.is_empty() {
            return Err(PincodeValidationError::Empty);
        }
        if cleaned.len() != PINCODE_LEN || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PincodeValidationError::InvalidFormat);
        }
        Ok(Self(cleaned))
    }

    /// Borrow the underlying pincode as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Pincode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Pincode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::str::FromStr for Pincode {
    type Err = PincodeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Pincode {
    type Error = PincodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Pincode> for String {
    fn from(value: Pincode) -> Self {
        value.0
    }
}

/// Validation errors returned when constructing [`Pincode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PincodeValidationError {
    /// Input is empty after stripping whitespace.
    #[error("pincode must not be empty")]
    Empty,
    /// Input is not exactly six ASCII digits.
    #[error("pincode must be exactly six digits")]
    InvalidFormat,
}
