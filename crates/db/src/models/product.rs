//! Product entity and DTOs.
//!
//! The attribute list is stored as JSONB in submission order; the SKU list
//! lives in the `product_skus` junction table with an explicit position.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use vitrine_core::sku::AttributeSelection;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub attributes: Json<Vec<AttributeSelection>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product row with its SKU count, for list views.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: DbId,
    pub name: String,
    pub attributes: Json<Vec<AttributeSelection>>,
    pub count_of_skus: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product together with its ordered SKU ids.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithSkus {
    #[serde(flatten)]
    pub product: Product,
    pub sku_ids: Vec<DbId>,
}

/// DTO for inserting a product row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeSelection>,
}

/// DTO for updating a product row. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub attributes: Option<Vec<AttributeSelection>>,
}
