//! Bearer credential parsing.
//!
//! Bearer tokens have the fixed shape `test-token-<user id>`. Anything else
//! presented as a bearer token is a hard authentication failure; there is no
//! fallback to cookie authentication once a bearer header is present.

use core::fmt;

use crate::UserId;

/// Prefix every bearer token must start with.
pub const BEARER_TOKEN_PREFIX: &str = "test-token-";

/// Errors that can occur when parsing a [`BearerToken`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BearerTokenError {
    /// The token does not start with the expected prefix.
    #[error("bearer token has an unrecognised format")]
    UnknownFormat,
    /// The part after the prefix is not a valid user id.
    #[error("bearer token does not reference a valid user id")]
    InvalidUserId,
}

/// A parsed bearer credential naming the user it authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BearerToken {
    user_id: UserId,
}

impl BearerToken {
    /// Parse the token part of an `Authorization: Bearer <token>` header.
    ///
    /// # Errors
    ///
    /// Returns `BearerTokenError::UnknownFormat` if the prefix is missing and
    /// `BearerTokenError::InvalidUserId` if the suffix is not a positive integer.
    ///
    /// ```
    /// use favorites_core::{BearerToken, UserId};
    ///
    /// let token = BearerToken::parse("test-token-12").unwrap();
    /// assert_eq!(token.user_id(), UserId::new(12));
    /// assert!(BearerToken::parse("invalid-token").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self, BearerTokenError> {
        let raw_id = token
            .strip_prefix(BEARER_TOKEN_PREFIX)
            .ok_or(BearerTokenError::UnknownFormat)?;

        if raw_id.is_empty() || !raw_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BearerTokenError::InvalidUserId);
        }

        let id = raw_id
            .parse::<i32>()
            .map_err(|_| BearerTokenError::InvalidUserId)?;
        if id <= 0 {
            return Err(BearerTokenError::InvalidUserId);
        }

        Ok(Self {
            user_id: UserId::new(id),
        })
    }

    /// Build the token string for a user.
    #[must_use]
    pub fn for_user(user_id: UserId) -> String {
        format!("{BEARER_TOKEN_PREFIX}{user_id}")
    }

    /// The user this token claims to authenticate.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{BEARER_TOKEN_PREFIX}{}", self.user_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let token = BearerToken::parse("test-token-1").unwrap();
        assert_eq!(token.user_id(), UserId::new(1));
        assert_eq!(token.to_string(), "test-token-1");
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert_eq!(
            BearerToken::parse("invalid-token"),
            Err(BearerTokenError::UnknownFormat)
        );
        assert_eq!(BearerToken::parse(""), Err(BearerTokenError::UnknownFormat));
        assert_eq!(
            BearerToken::parse("test-token-"),
            Err(BearerTokenError::InvalidUserId)
        );
        assert_eq!(
            BearerToken::parse("test-token-abc"),
            Err(BearerTokenError::InvalidUserId)
        );
        assert_eq!(
            BearerToken::parse("test-token--3"),
            Err(BearerTokenError::InvalidUserId)
        );
        assert_eq!(
            BearerToken::parse("test-token-0"),
            Err(BearerTokenError::InvalidUserId)
        );
        assert_eq!(
            BearerToken::parse("test-token-99999999999"),
            Err(BearerTokenError::InvalidUserId)
        );
    }

    #[test]
    fn test_for_user_round_trips() {
        let raw = BearerToken::for_user(UserId::new(77));
        assert_eq!(BearerToken::parse(&raw).unwrap().user_id(), UserId::new(77));
    }
}
