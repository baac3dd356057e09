//! Adding and removing SKUs on a favorite list.

use favorites_core::{FavoriteListId, Sku, UserId};

use super::{FavoritesError, OwnershipGuard};
use crate::db::{RepositoryError, Store};
use crate::models::AddedProduct;

/// List membership service.
pub struct ListProductService<'a> {
    store: &'a dyn Store,
    guard: OwnershipGuard<'a>,
}

impl<'a> ListProductService<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self {
            store,
            guard: OwnershipGuard::new(store),
        }
    }

    /// Add a SKU to an owned list.
    ///
    /// Adding a SKU that is already on the list returns the existing row with
    /// `created == false`.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::ListNotFound` if the list is not visible to the user.
    pub async fn add_product(
        &self,
        user_id: UserId,
        list_id: FavoriteListId,
        sku: &Sku,
    ) -> Result<AddedProduct, FavoritesError> {
        let list = self.guard.fetch_owned_list(user_id, list_id).await?;
        let added = self.store.add_list_product(list.id, sku).await?;

        if added.created {
            tracing::info!(%list_id, %sku, "Added product to list");
        } else {
            tracing::debug!(%list_id, %sku, "Product already on list");
        }

        Ok(added)
    }

    /// Remove a SKU from an owned list.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::ListNotFound` if the list is not visible to the user.
    /// Returns `FavoritesError::ProductNotInList` if the SKU is not on the list.
    pub async fn remove_product(
        &self,
        user_id: UserId,
        list_id: FavoriteListId,
        sku: &Sku,
    ) -> Result<(), FavoritesError> {
        let list = self.guard.fetch_owned_list(user_id, list_id).await?;
        let membership = self.guard.fetch_owned_membership(&list, sku).await?;

        self.store
            .delete_list_product(&membership)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => FavoritesError::ProductNotInList(sku.to_string()),
                other => FavoritesError::Repository(other),
            })?;

        tracing::info!(%list_id, %sku, "Removed product from list");
        Ok(())
    }
}
