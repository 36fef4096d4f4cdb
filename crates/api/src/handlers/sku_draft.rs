//! Stateless helpers behind the product form's SKU table.
//!
//! Nothing here writes to the database. The form posts its current attribute
//! rows and draft SKUs, and gets back the reconciled rows, a per-row diff
//! against what is stored, or attribute references resolved against the
//! catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::catalog::{
    available_attributes, resolve_selections, AttributeDefinition, AttributeReference,
};
use vitrine_core::error::CoreError;
use vitrine_core::sku::{
    check_combination_limit, diff_drafts, regenerate, AttributeSelection, DraftSku,
};
use vitrine_core::types::DbId;
use vitrine_db::repositories::{AttributeRepo, ProductRepo, SkuRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    #[serde(default)]
    pub selections: Vec<AttributeSelection>,
    #[serde(default)]
    pub previous: Vec<DraftSku>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffRequest {
    /// Product whose stored SKUs the drafts are compared to. `None` compares
    /// against nothing, so every draft shows as added.
    pub product_id: Option<DbId>,
    #[serde(default)]
    pub skus: Vec<DraftSku>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    #[serde(default)]
    pub references: Vec<AttributeReference>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub selections: Vec<AttributeSelection>,
    /// Catalog attributes not yet used by any row.
    pub available: Vec<AttributeDefinition>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/sku-drafts/regenerate
///
/// Generate every combination of the complete attribute rows and carry over
/// values and backend ids from `previous` by model.
pub async fn regenerate_drafts(
    Json(input): Json<RegenerateRequest>,
) -> AppResult<impl IntoResponse> {
    check_combination_limit(&input.selections)?;

    let drafts = regenerate(&input.selections, &input.previous);
    tracing::debug!(
        combinations = drafts.len(),
        previous = input.previous.len(),
        "Regenerated SKU drafts"
    );

    Ok(Json(DataResponse { data: drafts }))
}

/// POST /api/v1/sku-drafts/diff
pub async fn diff(
    State(state): State<AppState>,
    Json(input): Json<DiffRequest>,
) -> AppResult<impl IntoResponse> {
    let persisted: Vec<DraftSku> = match input.product_id {
        Some(id) => {
            ProductRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Product",
                    id,
                }))?;
            let sku_ids = ProductRepo::sku_ids(&state.pool, id).await?;
            SkuRepo::find_by_ids(&state.pool, &sku_ids)
                .await?
                .iter()
                .map(|sku| sku.to_draft())
                .collect()
        }
        None => Vec::new(),
    };

    let diff = diff_drafts(&persisted, &input.skus);
    Ok(Json(DataResponse { data: diff }))
}

/// POST /api/v1/sku-drafts/resolve
pub async fn resolve(
    State(state): State<AppState>,
    Json(input): Json<ResolveRequest>,
) -> AppResult<impl IntoResponse> {
    let catalog: Vec<AttributeDefinition> = AttributeRepo::list(&state.pool)
        .await?
        .iter()
        .map(|a| a.to_definition())
        .collect();

    let selections = resolve_selections(&catalog, &input.references);
    let available = available_attributes(&catalog, &selections)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse {
        data: ResolveResponse {
            selections,
            available,
        },
    }))
}
