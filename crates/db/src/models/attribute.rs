//! Attribute catalog entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::catalog::AttributeDefinition;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `attributes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "attribute_values")]
    pub values: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Attribute {
    /// Normalized form consumed by attribute resolution.
    pub fn to_definition(&self) -> AttributeDefinition {
        AttributeDefinition {
            id: self.id,
            name: self.name.clone(),
            values: self.values.clone(),
        }
    }
}

/// DTO for creating a catalog attribute.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttribute {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// DTO for updating a catalog attribute. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAttribute {
    pub name: Option<String>,
    pub values: Option<Vec<String>>,
}
