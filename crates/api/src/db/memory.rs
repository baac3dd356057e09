//! Process-local store.
//!
//! Mirrors the `PostgreSQL` schema: serial IDs, unique email and remember
//! token, unique `(favorite_list_id, sku)`, soft-deleted lists. Used for
//! `FAVORITES_STORAGE=memory` and by the test suites.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use favorites_core::{FavoriteListId, ListName, ListProductId, ListStatus, Sku, UserId};

use super::{FavoriteListStore, ListProductStore, RepositoryError, Store, UserStore};
use crate::models::{AddedProduct, FavoriteList, ListProduct, NewUser, User};
use crate::services::Owned;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    lists: Vec<FavoriteList>,
    list_products: Vec<ListProduct>,
    next_user_id: i32,
    next_list_id: i32,
    next_list_product_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// In-memory store with the same semantics as [`PgStore`](super::PgStore).
///
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("unavailable", &self.unavailable.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    /// Number of list rows in any status.
    pub async fn list_count(&self) -> usize {
        self.tables.read().await.lists.len()
    }

    /// Number of membership rows across all lists.
    pub async fn list_product_count(&self) -> usize {
        self.tables.read().await.list_products.len()
    }

    /// Number of user rows.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_remember_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| {
                u.remember_token
                    .as_ref()
                    .is_some_and(|t| t.expose_secret() == token)
            })
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        let email_taken = tables
            .users
            .iter()
            .any(|u| u.email.as_str().eq_ignore_ascii_case(user.email.as_str()));
        let token_taken = user.remember_token.as_ref().is_some_and(|new| {
            tables.users.iter().any(|u| {
                u.remember_token
                    .as_ref()
                    .is_some_and(|t| t.expose_secret() == new.expose_secret())
            })
        });
        if email_taken || token_taken {
            return Err(RepositoryError::Conflict("user already exists".to_owned()));
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(next_id(&mut tables.next_user_id)),
            name: user.name,
            email: user.email,
            remember_token: user.remember_token,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl FavoriteListStore for MemoryStore {
    async fn list_active_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FavoriteList>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .lists
            .iter()
            .filter(|l| l.user_id == user_id && l.status.is_active())
            .cloned()
            .collect())
    }

    async fn find_list(
        &self,
        id: FavoriteListId,
    ) -> Result<Option<FavoriteList>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.lists.iter().find(|l| l.id == id).cloned())
    }

    async fn create_list(
        &self,
        user_id: UserId,
        name: &ListName,
    ) -> Result<FavoriteList, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(RepositoryError::Conflict(format!(
                "user {user_id} does not exist"
            )));
        }

        let now = Utc::now();
        let list = FavoriteList {
            id: FavoriteListId::new(next_id(&mut tables.next_list_id)),
            user_id,
            name: name.clone(),
            created_at: now,
            updated_at: now,
            status: ListStatus::Active,
            deleted_at: None,
        };
        tables.lists.push(list.clone());
        Ok(list)
    }

    async fn rename_list(
        &self,
        list: &Owned<FavoriteList>,
        name: &ListName,
    ) -> Result<FavoriteList, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        let row = tables
            .lists
            .iter_mut()
            .find(|l| l.id == list.id && l.user_id == list.user_id && l.status.is_active())
            .ok_or(RepositoryError::NotFound)?;
        row.name = name.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn soft_delete_list(&self, list: &Owned<FavoriteList>) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        let row = tables
            .lists
            .iter_mut()
            .find(|l| l.id == list.id && l.user_id == list.user_id && l.status.is_active())
            .ok_or(RepositoryError::NotFound)?;
        row.status = ListStatus::Deleted;
        row.deleted_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl ListProductStore for MemoryStore {
    async fn products_for_list(
        &self,
        list_id: FavoriteListId,
    ) -> Result<Vec<ListProduct>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .list_products
            .iter()
            .filter(|p| p.favorite_list_id == list_id)
            .cloned()
            .collect())
    }

    async fn find_list_product(
        &self,
        list_id: FavoriteListId,
        sku: &Sku,
    ) -> Result<Option<ListProduct>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .list_products
            .iter()
            .find(|p| p.favorite_list_id == list_id && &p.sku == sku)
            .cloned())
    }

    async fn add_list_product(
        &self,
        list_id: FavoriteListId,
        sku: &Sku,
    ) -> Result<AddedProduct, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables
            .list_products
            .iter()
            .find(|p| p.favorite_list_id == list_id && &p.sku == sku)
        {
            return Ok(AddedProduct {
                product: existing.clone(),
                created: false,
            });
        }

        if !tables.lists.iter().any(|l| l.id == list_id) {
            return Err(RepositoryError::Conflict(format!(
                "favorite list {list_id} does not exist"
            )));
        }

        let now = Utc::now();
        let product = ListProduct {
            id: ListProductId::new(next_id(&mut tables.next_list_product_id)),
            favorite_list_id: list_id,
            sku: sku.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.list_products.push(product.clone());
        Ok(AddedProduct {
            product,
            created: true,
        })
    }

    async fn delete_list_product(&self, product: &Owned<ListProduct>) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        let before = tables.list_products.len();
        tables
            .list_products
            .retain(|p| !(p.id == product.id && p.favorite_list_id == product.favorite_list_id));
        if tables.list_products.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use favorites_core::Email;
    use secrecy::SecretString;

    use super::*;
    use crate::services::OwnershipGuard;

    fn new_user(email: &str, token: &str) -> NewUser {
        NewUser {
            name: "Test User".to_owned(),
            email: Email::parse(email).unwrap(),
            password_hash: "$argon2id$placeholder".to_owned(),
            remember_token: Some(SecretString::from(token)),
        }
    }

    #[tokio::test]
    async fn test_create_user_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = store.create_user(new_user("a@example.com", "tok-a")).await.unwrap();
        let b = store.create_user(new_user("b@example.com", "tok-b")).await.unwrap();
        assert_eq!(a.id.as_i32(), 1);
        assert_eq!(b.id.as_i32(), 2);
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email_and_token() {
        let store = MemoryStore::new();
        store.create_user(new_user("a@example.com", "tok-a")).await.unwrap();

        let dup_email = store.create_user(new_user("A@example.com", "tok-b")).await;
        assert!(matches!(dup_email, Err(RepositoryError::Conflict(_))));

        let dup_token = store.create_user(new_user("c@example.com", "tok-a")).await;
        assert!(matches!(dup_token, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_find_user_by_remember_token() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com", "tok-a")).await.unwrap();

        let found = store.find_user_by_remember_token("tok-a").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(store.find_user_by_remember_token("tok-x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_soft_deleted_list_is_hidden_from_collection_but_findable() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com", "tok-a")).await.unwrap();
        let name = ListName::parse("Wishlist").unwrap();
        let list = store.create_list(user.id, &name).await.unwrap();
        let owned = OwnershipGuard::new(&store)
            .fetch_owned_list(user.id, list.id)
            .await
            .unwrap();

        store.soft_delete_list(&owned).await.unwrap();

        assert!(store.list_active_for_user(user.id).await.unwrap().is_empty());
        let found = store.find_list(list.id).await.unwrap().unwrap();
        assert_eq!(found.status, ListStatus::Deleted);
        assert!(found.deleted_at.is_some());
        assert!(matches!(
            store.soft_delete_list(&owned).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_owned_handle_does_not_outlive_deletion() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com", "tok-a")).await.unwrap();
        let list = store
            .create_list(user.id, &ListName::parse("Wishlist").unwrap())
            .await
            .unwrap();
        let guard = OwnershipGuard::new(&store);
        let owned = guard.fetch_owned_list(user.id, list.id).await.unwrap();
        let sku = Sku::parse("ABC123").unwrap();
        store.add_list_product(list.id, &sku).await.unwrap();
        let membership = guard.fetch_owned_membership(&owned, &sku).await.unwrap();

        store.delete_list_product(&membership).await.unwrap();
        assert!(matches!(
            store.delete_list_product(&membership).await,
            Err(RepositoryError::NotFound)
        ));

        store.soft_delete_list(&owned).await.unwrap();
        let renamed = store
            .rename_list(&owned, &ListName::parse("Renamed").unwrap())
            .await;
        assert!(matches!(renamed, Err(RepositoryError::NotFound)));
        let stored = store.find_list(list.id).await.unwrap().unwrap();
        assert_eq!(stored.name.as_str(), "Wishlist");
    }

    #[tokio::test]
    async fn test_add_list_product_is_idempotent() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com", "tok-a")).await.unwrap();
        let list = store
            .create_list(user.id, &ListName::parse("Gifts").unwrap())
            .await
            .unwrap();
        let sku = Sku::parse("ABC123").unwrap();

        let first = store.add_list_product(list.id, &sku).await.unwrap();
        let second = store.add_list_product(list.id, &sku).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.product.id, second.product.id);
        assert_eq!(store.list_product_count().await, 1);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = MemoryStore::new();
        store.set_unavailable(true);

        assert!(matches!(
            store.ping().await,
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        ));
        assert!(store.find_user(UserId::new(1)).await.is_err());

        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }
}
