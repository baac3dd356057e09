//! Single-owner access checks.
//!
//! A list is visible to a user only if it exists, is active, and belongs to
//! that user. All three failures collapse into the same
//! [`FavoritesError::ListNotFound`] so a caller cannot probe for lists owned
//! by others. Memberships are reached only through an [`Owned`] list.

use std::ops::Deref;

use favorites_core::{FavoriteListId, Sku, UserId};

use super::FavoritesError;
use crate::db::Store;
use crate::models::{FavoriteList, ListProduct};

/// A resource that passed the ownership check for the current user.
///
/// Only this module can construct one. The store's mutating operations
/// (`rename_list`, `soft_delete_list`, `delete_list_product`) take
/// `&Owned<T>`, so they cannot be handed an unchecked row. They still
/// re-assert owner and status in their own filters.
#[derive(Debug, Clone)]
pub struct Owned<T>(T);

impl<T> Owned<T> {
    /// Unwrap the checked resource.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Owned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Whether `user_id` may see `list`.
#[must_use]
pub fn is_visible_to(list: &FavoriteList, user_id: UserId) -> bool {
    list.is_owned_by(user_id) && list.status.is_active()
}

/// Fetches resources on behalf of a user.
pub struct OwnershipGuard<'a> {
    store: &'a dyn Store,
}

impl<'a> OwnershipGuard<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Fetch a list if `user_id` owns it and it has not been deleted.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::ListNotFound` if the list is missing, deleted,
    /// or owned by another user.
    /// Returns `FavoritesError::Repository` if the lookup fails.
    pub async fn fetch_owned_list(
        &self,
        user_id: UserId,
        list_id: FavoriteListId,
    ) -> Result<Owned<FavoriteList>, FavoritesError> {
        match self.store.find_list(list_id).await? {
            Some(list) if is_visible_to(&list, user_id) => Ok(Owned(list)),
            Some(_) => {
                tracing::debug!(%list_id, %user_id, "List not visible to user");
                Err(FavoritesError::ListNotFound(list_id.to_string()))
            }
            None => Err(FavoritesError::ListNotFound(list_id.to_string())),
        }
    }

    /// Fetch the membership of `sku` in an owned list.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::ProductNotInList` if the SKU is not on the list.
    /// Returns `FavoritesError::Repository` if the lookup fails.
    pub async fn fetch_owned_membership(
        &self,
        list: &Owned<FavoriteList>,
        sku: &Sku,
    ) -> Result<Owned<ListProduct>, FavoritesError> {
        self.store
            .find_list_product(list.id, sku)
            .await?
            .map(Owned)
            .ok_or_else(|| FavoritesError::ProductNotInList(sku.to_string()))
    }
}
