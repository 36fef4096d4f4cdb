//! SKU entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::sku::DraftSku;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `skus` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub id: DbId,
    pub model: String,
    pub price: String,
    pub number_in_stock: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Sku {
    /// Map a stored SKU into the draft shape used by the edit form.
    pub fn to_draft(&self) -> DraftSku {
        DraftSku {
            model: self.model.clone(),
            price: self.price.clone(),
            number_in_stock: self.number_in_stock.to_string(),
            backend_id: Some(self.id),
        }
    }
}

/// DTO for creating a SKU.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSku {
    pub model: String,
    pub price: String,
    pub number_in_stock: i32,
}

/// DTO for updating a SKU. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSku {
    pub model: Option<String>,
    pub price: Option<String>,
    pub number_in_stock: Option<i32>,
}
