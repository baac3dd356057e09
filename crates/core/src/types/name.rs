//! Favorite list display name.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ListName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ListNameError {
    /// The name is empty (or only whitespace).
    #[error("The name field is required.")]
    Empty,
    /// The name is longer than [`ListName::MAX_CHARS`] characters.
    #[error("The name field must not be greater than {max} characters.")]
    TooLong {
        /// Maximum allowed length in characters.
        max: usize,
    },
}

/// A validated favorite list name.
///
/// Surrounding whitespace is trimmed before validation, so `"  Books "` is
/// stored as `"Books"` and `"   "` is rejected as empty. Length is counted in
/// characters, not bytes.
///
/// ```
/// use favorites_core::ListName;
///
/// assert_eq!(ListName::parse(" Electronics ").unwrap().as_str(), "Electronics");
/// assert!(ListName::parse("").is_err());
/// assert!(ListName::parse(&"x".repeat(256)).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ListName(String);

impl ListName {
    /// Maximum name length in characters.
    pub const MAX_CHARS: usize = 255;

    /// Parse a list name.
    ///
    /// # Errors
    ///
    /// Returns `ListNameError::Empty` for blank input and
    /// `ListNameError::TooLong` for more than 255 characters.
    pub fn parse(s: &str) -> Result<Self, ListNameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ListNameError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_CHARS {
            return Err(ListNameError::TooLong {
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ListName {
    type Error = ListNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ListName> for String {
    fn from(name: ListName) -> Self {
        name.0
    }
}

impl AsRef<str> for ListName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(ListName::parse(""), Err(ListNameError::Empty));
        assert_eq!(ListName::parse(" \t\n"), Err(ListNameError::Empty));
        assert!(ListName::parse(&"a".repeat(255)).is_ok());
        assert_eq!(
            ListName::parse(&"a".repeat(256)),
            Err(ListNameError::TooLong { max: 255 })
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // 255 multi-byte characters are fine even though they exceed 255 bytes.
        let name = "é".repeat(255);
        assert!(ListName::parse(&name).is_ok());
    }

    #[test]
    fn test_trims_whitespace() {
        let name = ListName::parse("  My Favorites  ").unwrap();
        assert_eq!(name.as_str(), "My Favorites");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ListNameError::Empty.to_string(), "The name field is required.");
        assert_eq!(
            ListNameError::TooLong { max: 255 }.to_string(),
            "The name field must not be greater than 255 characters."
        );
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<ListName>("\"Books\"").is_ok());
        assert!(serde_json::from_str::<ListName>("\"\"").is_err());
    }
}
