//! Repository for the `products` and `product_skus` tables.

use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use vitrine_core::types::DbId;

use crate::models::product::{
    CreateProduct, Product, ProductSummary, ProductWithSkus, UpdateProduct,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, attributes, created_at, updated_at";

/// Provides CRUD operations for products and their SKU associations.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product row, returning it.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProduct,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name, attributes) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(Json(&input.attributes))
            .fetch_one(executor)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a product by ID together with its ordered SKU ids.
    pub async fn find_by_id_with_skus(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductWithSkus>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(product) => {
                let sku_ids = Self::sku_ids(pool, product.id).await?;
                Ok(Some(ProductWithSkus { product, sku_ids }))
            }
            None => Ok(None),
        }
    }

    /// Ordered SKU ids attached to a product.
    pub async fn sku_ids<'e>(
        executor: impl PgExecutor<'e>,
        product_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT sku_id FROM product_skus WHERE product_id = $1 ORDER BY position",
        )
        .bind(product_id)
        .fetch_all(executor)
        .await
    }

    /// List products, newest first, with SKU counts.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProductSummary>(
            "SELECT p.id, p.name, p.attributes, \
                    (SELECT COUNT(*) FROM product_skus ps WHERE ps.product_id = p.id) \
                        AS count_of_skus, \
                    p.created_at, p.updated_at \
             FROM products p \
             ORDER BY p.id DESC \
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Total number of products.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await
    }

    /// Update a product row. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                attributes = COALESCE($3, attributes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.attributes.as_ref().map(Json))
            .fetch_optional(executor)
            .await
    }

    /// Replace the SKU list of a product, keeping the given order.
    pub async fn set_skus(
        tx: &mut Transaction<'_, Postgres>,
        product_id: DbId,
        sku_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM product_skus WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            "INSERT INTO product_skus (product_id, sku_id, position) \
             SELECT $1, s.sku_id, s.ord::int \
             FROM UNNEST($2::bigint[]) WITH ORDINALITY AS s(sku_id, ord)",
        )
        .bind(product_id)
        .bind(sku_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Delete a product and its SKU associations. The SKU rows stay.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
