//! Favorite list operations.
//!
//! Every operation on a single list goes through the [`OwnershipGuard`];
//! the collection read filters by owner in the store instead.

use favorites_core::{FavoriteListId, ListName, UserId};

use super::{FavoritesError, OwnershipGuard, ProductLookup};
use crate::db::{RepositoryError, Store};
use crate::models::{FavoriteList, FavoriteListWithProducts};

/// Favorite list service.
pub struct FavoriteListService<'a> {
    store: &'a dyn Store,
    products: &'a dyn ProductLookup,
    guard: OwnershipGuard<'a>,
}

impl<'a> FavoriteListService<'a> {
    /// Create a new favorite list service.
    #[must_use]
    pub const fn new(store: &'a dyn Store, products: &'a dyn ProductLookup) -> Self {
        Self {
            store,
            products,
            guard: OwnershipGuard::new(store),
        }
    }

    /// All active lists of a user in creation order.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Repository` if the query fails.
    pub async fn list_all(&self, user_id: UserId) -> Result<Vec<FavoriteList>, FavoritesError> {
        Ok(self.store.list_active_for_user(user_id).await?)
    }

    /// Create a list owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Repository` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        name: &ListName,
    ) -> Result<FavoriteList, FavoritesError> {
        let list = self.store.create_list(user_id, name).await?;
        tracing::info!(list_id = %list.id, %user_id, "Created favorite list");
        Ok(list)
    }

    /// Get a single owned list.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::ListNotFound` if the list is not visible to the user.
    pub async fn get(
        &self,
        user_id: UserId,
        list_id: FavoriteListId,
    ) -> Result<FavoriteList, FavoritesError> {
        Ok(self.guard.fetch_owned_list(user_id, list_id).await?.into_inner())
    }

    /// Get an owned list with its products resolved through the catalog.
    ///
    /// SKUs the catalog does not know are left out.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::ListNotFound` if the list is not visible to the user.
    pub async fn get_with_products(
        &self,
        user_id: UserId,
        list_id: FavoriteListId,
    ) -> Result<FavoriteListWithProducts, FavoritesError> {
        let list = self.guard.fetch_owned_list(user_id, list_id).await?;
        let memberships = self.store.products_for_list(list.id).await?;

        let products = memberships
            .iter()
            .filter_map(|m| {
                let product = self.products.lookup(&m.sku);
                if product.is_none() {
                    tracing::warn!(%list_id, sku = %m.sku, "No catalog entry for SKU");
                }
                product
            })
            .collect();

        Ok(FavoriteListWithProducts {
            list: list.into_inner(),
            products,
        })
    }

    /// Rename an owned list.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::ListNotFound` if the list is not visible to the
    /// user, including when it is deleted concurrently.
    pub async fn rename(
        &self,
        user_id: UserId,
        list_id: FavoriteListId,
        name: &ListName,
    ) -> Result<FavoriteList, FavoritesError> {
        let list = self.guard.fetch_owned_list(user_id, list_id).await?;
        self.store
            .rename_list(&list, name)
            .await
            .map_err(|e| not_found_as_list(e, list_id))
    }

    /// Soft-delete an owned list.
    ///
    /// The row stays in storage; later lookups report it as not found.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::ListNotFound` if the list is not visible to the user.
    pub async fn soft_delete(
        &self,
        user_id: UserId,
        list_id: FavoriteListId,
    ) -> Result<(), FavoritesError> {
        let list = self.guard.fetch_owned_list(user_id, list_id).await?;
        self.store
            .soft_delete_list(&list)
            .await
            .map_err(|e| not_found_as_list(e, list_id))?;
        tracing::info!(%list_id, %user_id, "Deleted favorite list");
        Ok(())
    }
}

fn not_found_as_list(err: RepositoryError, list_id: FavoriteListId) -> FavoritesError {
    match err {
        RepositoryError::NotFound => FavoritesError::ListNotFound(list_id.to_string()),
        other => FavoritesError::Repository(other),
    }
}
