//! Product SKU type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Sku`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkuError {
    /// The SKU is empty (or only whitespace).
    #[error("The sku field is required.")]
    Empty,
    /// The SKU does not fit the storage column.
    #[error("The sku field must not be greater than {max} characters.")]
    TooLong {
        /// Maximum allowed length in characters.
        max: usize,
    },
}

/// An opaque product identifier.
///
/// SKUs are not checked against any catalog; the only constraints are that
/// they are non-empty and fit the database column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

impl Sku {
    /// Maximum SKU length in characters.
    pub const MAX_CHARS: usize = 255;

    /// Parse a SKU, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `SkuError::Empty` for blank input and `SkuError::TooLong`
    /// for more than 255 characters.
    pub fn parse(s: &str) -> Result<Self, SkuError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SkuError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_CHARS {
            return Err(SkuError::TooLong {
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Sku {
    type Error = SkuError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Sku> for String {
    fn from(sku: Sku) -> Self {
        sku.0
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Sku::parse("ABC123").unwrap().as_str(), "ABC123");
        assert_eq!(Sku::parse(" ABC123 ").unwrap().as_str(), "ABC123");
        assert_eq!(Sku::parse(""), Err(SkuError::Empty));
        assert_eq!(Sku::parse("   "), Err(SkuError::Empty));
        assert!(matches!(
            Sku::parse(&"9".repeat(256)),
            Err(SkuError::TooLong { .. })
        ));
    }
}
