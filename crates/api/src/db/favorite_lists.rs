//! Favorite list persistence.
//!
//! Reads by ID return rows in any status; callers decide visibility through
//! [`ListStatus`]. Only the per-owner collection query filters at the SQL
//! level. Mutations take the list handle returned by the ownership guard and
//! re-assert owner and status in their `WHERE` clause.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use favorites_core::{FavoriteListId, ListName, ListStatus, UserId};

use super::{PgStore, RepositoryError};
use crate::models::FavoriteList;
use crate::services::Owned;

/// Store operations on favorite lists.
#[async_trait]
pub trait FavoriteListStore: Send + Sync {
    /// All active lists owned by `user_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list_active_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FavoriteList>, RepositoryError>;

    /// Get a list by ID regardless of owner or status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_list(&self, id: FavoriteListId)
    -> Result<Option<FavoriteList>, RepositoryError>;

    /// Create a list for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    async fn create_list(
        &self,
        user_id: UserId,
        name: &ListName,
    ) -> Result<FavoriteList, RepositoryError>;

    /// Rename an active list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the list is gone or no longer active.
    async fn rename_list(
        &self,
        list: &Owned<FavoriteList>,
        name: &ListName,
    ) -> Result<FavoriteList, RepositoryError>;

    /// Mark an active list as deleted, keeping the row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the list is gone or already deleted.
    async fn soft_delete_list(&self, list: &Owned<FavoriteList>) -> Result<(), RepositoryError>;
}

#[derive(sqlx::FromRow)]
struct FavoriteListRow {
    id: FavoriteListId,
    user_id: UserId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<FavoriteListRow> for FavoriteList {
    type Error = RepositoryError;

    fn try_from(row: FavoriteListRow) -> Result<Self, Self::Error> {
        let name = ListName::parse(&row.name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid list name in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            name,
            created_at: row.created_at,
            updated_at: row.updated_at,
            status: ListStatus::from_deleted_marker(row.deleted_at.is_some()),
            deleted_at: row.deleted_at,
        })
    }
}

const LIST_COLUMNS: &str = "id, user_id, name, created_at, updated_at, deleted_at";

#[async_trait]
impl FavoriteListStore for PgStore {
    async fn list_active_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FavoriteList>, RepositoryError> {
        let rows = sqlx::query_as::<_, FavoriteListRow>(&format!(
            r"
            SELECT {LIST_COLUMNS}
            FROM favorite_lists
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY id ASC
            "
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(FavoriteList::try_from).collect()
    }

    async fn find_list(
        &self,
        id: FavoriteListId,
    ) -> Result<Option<FavoriteList>, RepositoryError> {
        let row = sqlx::query_as::<_, FavoriteListRow>(&format!(
            "SELECT {LIST_COLUMNS} FROM favorite_lists WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(FavoriteList::try_from).transpose()
    }

    async fn create_list(
        &self,
        user_id: UserId,
        name: &ListName,
    ) -> Result<FavoriteList, RepositoryError> {
        let row = sqlx::query_as::<_, FavoriteListRow>(&format!(
            r"
            INSERT INTO favorite_lists (user_id, name)
            VALUES ($1, $2)
            RETURNING {LIST_COLUMNS}
            "
        ))
        .bind(user_id)
        .bind(name.as_str())
        .fetch_one(self.pool())
        .await?;

        FavoriteList::try_from(row)
    }

    async fn rename_list(
        &self,
        list: &Owned<FavoriteList>,
        name: &ListName,
    ) -> Result<FavoriteList, RepositoryError> {
        let row = sqlx::query_as::<_, FavoriteListRow>(&format!(
            r"
            UPDATE favorite_lists
            SET name = $1, updated_at = NOW()
            WHERE id = $2 AND user_id = $3 AND deleted_at IS NULL
            RETURNING {LIST_COLUMNS}
            "
        ))
        .bind(name.as_str())
        .bind(list.id)
        .bind(list.user_id)
        .fetch_optional(self.pool())
        .await?
        .ok_or(RepositoryError::NotFound)?;

        FavoriteList::try_from(row)
    }

    async fn soft_delete_list(&self, list: &Owned<FavoriteList>) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE favorite_lists
            SET deleted_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            ",
        )
        .bind(list.id)
        .bind(list.user_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
