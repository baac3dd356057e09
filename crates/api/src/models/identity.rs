//! Request-scoped identity.

use favorites_core::UserId;

use super::User;

/// The user a request was resolved to.
///
/// Inserted into request extensions by the identity middleware and read by
/// the [`RequireUser`](crate::middleware::RequireUser) extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
}

impl CurrentUser {
    /// Identity for a stored user.
    #[must_use]
    pub const fn for_user(user: &User) -> Self {
        Self { id: user.id }
    }
}
