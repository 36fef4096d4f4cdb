//! Repository for the `attributes` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::attribute::{Attribute, CreateAttribute, UpdateAttribute};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, attribute_values, created_at, updated_at";

/// Provides CRUD operations for catalog attributes.
pub struct AttributeRepo;

impl AttributeRepo {
    /// Insert a new attribute, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAttribute) -> Result<Attribute, sqlx::Error> {
        let query = format!(
            "INSERT INTO attributes (name, attribute_values) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(input.name.trim())
            .bind(&input.values)
            .fetch_one(pool)
            .await
    }

    /// Find an attribute by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attribute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attributes WHERE id = $1");
        sqlx::query_as::<_, Attribute>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the whole catalog ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Attribute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attributes ORDER BY name, id");
        sqlx::query_as::<_, Attribute>(&query).fetch_all(pool).await
    }

    /// Update an attribute. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAttribute,
    ) -> Result<Option<Attribute>, sqlx::Error> {
        let query = format!(
            "UPDATE attributes SET \
                name = COALESCE($2, name), \
                attribute_values = COALESCE($3, attribute_values) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.values)
            .fetch_optional(pool)
            .await
    }

    /// Delete an attribute. Returns `true` if a row was removed.
    ///
    /// Products keep their own copy of attribute names and values, so
    /// deleting a catalog entry never touches existing products.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attributes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
