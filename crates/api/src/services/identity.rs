//! Identity resolution.
//!
//! Turns the credential material of a request into a user:
//!
//! 1. `Authorization: Bearer test-token-<id>` names a user directly. Any other
//!    bearer value, or an id with no user behind it, is rejected. There is no
//!    fallback to the cookie once a bearer header is present.
//! 2. Otherwise the identity cookie is matched against stored remember tokens.
//!    A cookie that matches nobody is rejected.
//! 3. With neither, the caller must provision an anonymous user.
//!
//! [`IdentityResolver::resolve`] only reads. Provisioning is a separate write
//! through [`IdentityResolver::provision`].

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use rand::Rng;
use rand::distr::Alphanumeric;
use secrecy::SecretString;
use thiserror::Error;

use favorites_core::{BearerToken, Email, EmailError};

use crate::db::{RepositoryError, Store};
use crate::models::user::ANONYMOUS_USER_NAME;
use crate::models::{NewUser, User};

/// Length of the remember token bound to the identity cookie.
pub const REMEMBER_TOKEN_LENGTH: usize = 60;

/// Length of the random part of an anonymous email address.
const ANONYMOUS_EMAIL_SUFFIX_LENGTH: usize = 10;

/// Length of the throwaway password given to anonymous users.
const PLACEHOLDER_PASSWORD_LENGTH: usize = 10;

/// Errors that can occur while resolving or provisioning an identity.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request carried a credential that does not identify anyone.
    #[error("unauthenticated: {0}")]
    Unauthenticated(&'static str),

    /// Generated email was rejected.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Credential material extracted from a request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Raw `Authorization` header value.
    pub authorization: Option<String>,
    /// Value of the identity cookie.
    pub cookie_token: Option<String>,
}

impl Credentials {
    /// The token of a `Bearer` authorization header, if that is the scheme used.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        let (scheme, token) = self.authorization.as_deref()?.split_once(' ')?;
        scheme
            .eq_ignore_ascii_case("Bearer")
            .then(|| token.trim())
    }

    fn remember_token(&self) -> Option<&str> {
        self.cookie_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Outcome of [`IdentityResolver::resolve`].
#[derive(Debug)]
pub enum Resolution {
    /// The credentials identify a stored user.
    Existing(User),
    /// No credential was presented.
    NeedsProvisioning,
}

/// A freshly created anonymous user and the token for its identity cookie.
#[derive(Debug)]
pub struct Provisioned {
    pub user: User,
    pub remember_token: SecretString,
}

/// Resolves request credentials to users.
pub struct IdentityResolver<'a> {
    store: &'a dyn Store,
}

impl<'a> IdentityResolver<'a> {
    /// Create a resolver over a store.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Look up the user the credentials identify.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthenticated` if a bearer token or cookie is
    /// present but does not identify a user.
    /// Returns `AuthError::Repository` if the store lookup fails.
    pub async fn resolve(&self, credentials: &Credentials) -> Result<Resolution, AuthError> {
        if let Some(raw) = credentials.bearer_token() {
            let token = BearerToken::parse(raw).map_err(|e| {
                tracing::warn!(error = %e, "Rejected bearer credential");
                AuthError::Unauthenticated("malformed bearer token")
            })?;

            let user = self.store.find_user(token.user_id()).await?.ok_or_else(|| {
                tracing::warn!(user_id = %token.user_id(), "Bearer credential names no user");
                AuthError::Unauthenticated("unknown bearer user")
            })?;

            return Ok(Resolution::Existing(user));
        }

        let Some(remember_token) = credentials.remember_token() else {
            return Ok(Resolution::NeedsProvisioning);
        };

        let user = self
            .store
            .find_user_by_remember_token(remember_token)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Identity cookie matches no user");
                AuthError::Unauthenticated("stale identity cookie")
            })?;

        Ok(Resolution::Existing(user))
    }

    /// Create an anonymous user with a fresh remember token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the insert fails, including a
    /// `RepositoryError::Conflict` when a generated value collides.
    /// Returns `AuthError::PasswordHash` if hashing the placeholder password fails.
    pub async fn provision(&self) -> Result<Provisioned, AuthError> {
        let remember_token = random_alphanumeric(REMEMBER_TOKEN_LENGTH);
        let email = Email::anonymous(&random_alphanumeric(ANONYMOUS_EMAIL_SUFFIX_LENGTH))?;
        let password_hash = hash_password(&random_alphanumeric(PLACEHOLDER_PASSWORD_LENGTH))?;

        let user = self
            .store
            .create_user(NewUser {
                name: ANONYMOUS_USER_NAME.to_owned(),
                email,
                password_hash,
                remember_token: Some(SecretString::from(remember_token.clone())),
            })
            .await?;

        tracing::info!(user_id = %user.id, "Provisioned anonymous user");

        Ok(Provisioned {
            user,
            remember_token: SecretString::from(remember_token),
        })
    }
}

/// Hash a password using Argon2.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Random string over `[A-Za-z0-9]`.
#[must_use]
pub fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::db::{MemoryStore, UserStore};

    fn bearer(value: &str) -> Credentials {
        Credentials {
            authorization: Some(value.to_owned()),
            cookie_token: None,
        }
    }

    fn cookie(value: &str) -> Credentials {
        Credentials {
            authorization: None,
            cookie_token: Some(value.to_owned()),
        }
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer("Bearer test-token-1").bearer_token(), Some("test-token-1"));
        assert_eq!(bearer("bearer abc").bearer_token(), Some("abc"));
        assert_eq!(bearer("Basic dXNlcjpwdw==").bearer_token(), None);
        assert_eq!(bearer("Bearer").bearer_token(), None);
        assert_eq!(Credentials::default().bearer_token(), None);
    }

    #[test]
    fn test_random_alphanumeric() {
        let token = random_alphanumeric(REMEMBER_TOKEN_LENGTH);
        assert_eq!(token.len(), 60);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, random_alphanumeric(REMEMBER_TOKEN_LENGTH));
    }

    #[test]
    fn test_hash_password_produces_argon2_phc() {
        let hash = hash_password("placeholder").unwrap();
        assert!(hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_no_credentials_needs_provisioning() {
        let store = MemoryStore::new();
        let resolver = IdentityResolver::new(&store);

        let resolution = resolver.resolve(&Credentials::default()).await.unwrap();
        assert!(matches!(resolution, Resolution::NeedsProvisioning));

        let empty_cookie = resolver.resolve(&cookie("")).await.unwrap();
        assert!(matches!(empty_cookie, Resolution::NeedsProvisioning));
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn test_provision_then_resolve_by_cookie() {
        let store = MemoryStore::new();
        let resolver = IdentityResolver::new(&store);

        let provisioned = resolver.provision().await.unwrap();
        assert_eq!(provisioned.user.name, "Anonymous User");
        assert!(provisioned.user.email.as_str().starts_with("anonymous-"));
        assert_eq!(provisioned.user.email.domain(), "example.com");
        assert_eq!(provisioned.remember_token.expose_secret().len(), 60);

        let resolution = resolver
            .resolve(&cookie(provisioned.remember_token.expose_secret()))
            .await
            .unwrap();
        match resolution {
            Resolution::Existing(user) => assert_eq!(user.id, provisioned.user.id),
            Resolution::NeedsProvisioning => panic!("cookie should resolve"),
        }
    }

    #[tokio::test]
    async fn test_bearer_resolves_existing_user() {
        let store = MemoryStore::new();
        let resolver = IdentityResolver::new(&store);
        let user = resolver.provision().await.unwrap().user;

        let resolution = resolver
            .resolve(&bearer(&format!("Bearer test-token-{}", user.id)))
            .await
            .unwrap();
        assert!(matches!(resolution, Resolution::Existing(u) if u.id == user.id));
    }

    #[tokio::test]
    async fn test_bearer_rejections_do_not_fall_back_to_cookie() {
        let store = MemoryStore::new();
        let resolver = IdentityResolver::new(&store);
        let provisioned = resolver.provision().await.unwrap();

        for header in [
            "Bearer invalid-token",
            "Bearer test-token-999",
            "Bearer t\u{fffd}st",
        ] {
            let credentials = Credentials {
                authorization: Some(header.to_owned()),
                cookie_token: Some(provisioned.remember_token.expose_secret().to_owned()),
            };
            let result = resolver.resolve(&credentials).await;
            assert!(matches!(result, Err(AuthError::Unauthenticated(_))), "{header}");
        }
    }

    #[tokio::test]
    async fn test_stale_cookie_is_rejected() {
        let store = MemoryStore::new();
        let resolver = IdentityResolver::new(&store);

        let result = resolver.resolve(&cookie("no-such-token")).await;
        assert!(matches!(result, Err(AuthError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_provision_failure_propagates() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let resolver = IdentityResolver::new(&store);

        let result = resolver.provision().await;
        assert!(matches!(result, Err(AuthError::Repository(_))));

        store.set_unavailable(false);
        assert!(store.find_user(1.into()).await.unwrap().is_none());
    }
}
