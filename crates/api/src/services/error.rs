//! Favorites service error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors from list and membership operations.
///
/// Both not-found variants surface as the same HTTP status; only the message
/// differs. A list owned by someone else is reported as `ListNotFound`.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// The list does not exist, is deleted, or belongs to another user.
    #[error("Favorite list not found: {0}")]
    ListNotFound(String),

    /// The list is visible but the SKU was never added to it.
    #[error("Product not found in favorite list: {0}")]
    ProductNotInList(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
