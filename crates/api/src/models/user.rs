//! User domain types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use favorites_core::{Email, UserId};

/// Display name given to implicitly provisioned users.
pub const ANONYMOUS_USER_NAME: &str = "Anonymous User";

/// A user account (domain type).
///
/// The password hash never leaves the store; it is only written.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// Long-lived opaque token bound to the identity cookie.
    pub remember_token: Option<SecretString>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data needed to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Remember token to bind to the identity cookie.
    pub remember_token: Option<SecretString>,
}
