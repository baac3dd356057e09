//! List membership persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use favorites_core::{FavoriteListId, ListProductId, Sku};

use super::{PgStore, RepositoryError};
use crate::models::{AddedProduct, ListProduct};
use crate::services::Owned;

/// Store operations on list memberships.
#[async_trait]
pub trait ListProductStore: Send + Sync {
    /// Memberships of a list in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn products_for_list(
        &self,
        list_id: FavoriteListId,
    ) -> Result<Vec<ListProduct>, RepositoryError>;

    /// The membership of `sku` in a list, if present.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_list_product(
        &self,
        list_id: FavoriteListId,
        sku: &Sku,
    ) -> Result<Option<ListProduct>, RepositoryError>;

    /// Add `sku` to a list, returning the existing row if it is already there.
    ///
    /// Concurrent adds of the same SKU converge on one row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    async fn add_list_product(
        &self,
        list_id: FavoriteListId,
        sku: &Sku,
    ) -> Result<AddedProduct, RepositoryError>;

    /// Remove a membership row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row no longer exists.
    async fn delete_list_product(&self, product: &Owned<ListProduct>) -> Result<(), RepositoryError>;
}

#[derive(sqlx::FromRow)]
struct ListProductRow {
    id: ListProductId,
    favorite_list_id: FavoriteListId,
    sku: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ListProductRow> for ListProduct {
    type Error = RepositoryError;

    fn try_from(row: ListProductRow) -> Result<Self, Self::Error> {
        let sku = Sku::parse(&row.sku)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid sku in database: {e}")))?;

        Ok(Self {
            id: row.id,
            favorite_list_id: row.favorite_list_id,
            sku,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, favorite_list_id, sku, created_at, updated_at";

#[async_trait]
impl ListProductStore for PgStore {
    async fn products_for_list(
        &self,
        list_id: FavoriteListId,
    ) -> Result<Vec<ListProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, ListProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM favorite_list_products
            WHERE favorite_list_id = $1
            ORDER BY id ASC
            "
        ))
        .bind(list_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(ListProduct::try_from).collect()
    }

    async fn find_list_product(
        &self,
        list_id: FavoriteListId,
        sku: &Sku,
    ) -> Result<Option<ListProduct>, RepositoryError> {
        let row = sqlx::query_as::<_, ListProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM favorite_list_products
            WHERE favorite_list_id = $1 AND sku = $2
            "
        ))
        .bind(list_id)
        .bind(sku.as_str())
        .fetch_optional(self.pool())
        .await?;

        row.map(ListProduct::try_from).transpose()
    }

    async fn add_list_product(
        &self,
        list_id: FavoriteListId,
        sku: &Sku,
    ) -> Result<AddedProduct, RepositoryError> {
        // The unique index on (favorite_list_id, sku) makes a racing insert a no-op.
        let inserted = sqlx::query_as::<_, ListProductRow>(&format!(
            r"
            INSERT INTO favorite_list_products (favorite_list_id, sku)
            VALUES ($1, $2)
            ON CONFLICT (favorite_list_id, sku) DO NOTHING
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(list_id)
        .bind(sku.as_str())
        .fetch_optional(self.pool())
        .await?;

        if let Some(row) = inserted {
            return Ok(AddedProduct {
                product: ListProduct::try_from(row)?,
                created: true,
            });
        }

        let existing = self
            .find_list_product(list_id, sku)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(AddedProduct {
            product: existing,
            created: false,
        })
    }

    async fn delete_list_product(&self, product: &Owned<ListProduct>) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM favorite_list_products
            WHERE id = $1 AND favorite_list_id = $2
            ",
        )
        .bind(product.id)
        .bind(product.favorite_list_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
