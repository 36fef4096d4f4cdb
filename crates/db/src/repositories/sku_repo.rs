//! Repository for the `skus` table.

use std::collections::HashMap;

use sqlx::{PgExecutor, PgPool};
use vitrine_core::types::DbId;

use crate::models::sku::{CreateSku, Sku, UpdateSku};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, model, price, number_in_stock, created_at, updated_at";

/// Provides CRUD operations for SKUs.
pub struct SkuRepo;

impl SkuRepo {
    /// Insert a new SKU, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateSku,
    ) -> Result<Sku, sqlx::Error> {
        let query = format!(
            "INSERT INTO skus (model, price, number_in_stock) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sku>(&query)
            .bind(&input.model)
            .bind(&input.price)
            .bind(input.number_in_stock)
            .fetch_one(executor)
            .await
    }

    /// Find a SKU by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sku>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skus WHERE id = $1");
        sqlx::query_as::<_, Sku>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the SKUs with the given ids, in the order the ids were given.
    ///
    /// Unknown ids are silently absent from the result; repeated ids yield
    /// one row each time they appear.
    pub async fn find_by_ids<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
    ) -> Result<Vec<Sku>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM skus WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, Sku>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await?;

        let by_id: HashMap<DbId, Sku> = rows.into_iter().map(|s| (s.id, s)).collect();
        Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }

    /// List all SKUs, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Sku>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skus ORDER BY id DESC");
        sqlx::query_as::<_, Sku>(&query).fetch_all(pool).await
    }

    /// Update a SKU. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateSku,
    ) -> Result<Option<Sku>, sqlx::Error> {
        let query = format!(
            "UPDATE skus SET \
                model = COALESCE($2, model), \
                price = COALESCE($3, price), \
                number_in_stock = COALESCE($4, number_in_stock) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sku>(&query)
            .bind(id)
            .bind(&input.model)
            .bind(&input.price)
            .bind(input.number_in_stock)
            .fetch_optional(executor)
            .await
    }

    /// Delete a SKU. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skus WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
