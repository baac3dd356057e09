//! Authentication extractors.
//!
//! Provides an extractor for reading the identity resolved by
//! [`identity_middleware`](super::identity_middleware) in route handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::models::CurrentUser;

/// Extractor that requires a resolved user.
///
/// The identity middleware either inserts a [`CurrentUser`] or answers the
/// request itself, so a rejection here means the route was mounted outside
/// that middleware.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, user {}!", user.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireUser(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("no resolved identity".to_owned()))
    }
}
