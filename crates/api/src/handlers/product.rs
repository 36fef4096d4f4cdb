//! Handlers for the `/products` resource.
//!
//! Creating and updating a product is a single submission: the product's
//! name, its attribute rows and the full set of draft SKU rows arrive in one
//! body and are persisted atomically (see [`crate::submission`]).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vitrine_core::error::CoreError;
use vitrine_core::pagination::{
    clamp_limit, clamp_offset, total_pages, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use vitrine_core::sku::{check_combination_limit, regenerate, AttributeSelection, DraftSku};
use vitrine_core::submission::SubmissionOutcome;
use vitrine_core::types::DbId;
use vitrine_db::models::product::ProductWithSkus;
use vitrine_db::repositories::{ProductRepo, SkuRepo};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page, PageMeta};
use crate::state::AppState;
use crate::submission::{submit_product, ProductSubmission};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// A saved product together with what the submission did.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub product: ProductWithSkus,
    pub outcome: SubmissionOutcome,
}

/// Seed state for the product edit form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDrafts {
    pub product_id: DbId,
    pub name: String,
    pub attributes: Vec<AttributeSelection>,
    /// Draft rows for every current combination, carrying stored values
    /// and backend ids where a persisted SKU matches.
    pub skus: Vec<DraftSku>,
}

async fn load_with_skus(state: &AppState, id: DbId) -> AppResult<ProductWithSkus> {
    ProductRepo::find_by_id_with_skus(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/products?limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);

    let items = ProductRepo::list(&state.pool, limit, offset).await?;
    let total = ProductRepo::count(&state.pool).await?;

    let meta = PageMeta {
        page: offset / limit + 1,
        per_page: limit,
        total,
        total_pages: total_pages(total, limit),
    };
    Ok(Json(DataResponse {
        data: Page { items, meta },
    }))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = load_with_skus(&state, id).await?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/products
///
/// Submit a new product with its draft SKU rows.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProductSubmission>,
) -> AppResult<impl IntoResponse> {
    let outcome = submit_product(&state.pool, None, &input).await?;

    tracing::info!(
        product_id = outcome.product_id,
        created = outcome.created.len(),
        updated = outcome.updated.len(),
        skipped = outcome.skipped.len(),
        "Product created"
    );

    let product = load_with_skus(&state, outcome.product_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmissionResponse { product, outcome },
        }),
    ))
}

/// PUT /api/v1/products/{id}
///
/// Resubmit an existing product. The submitted rows replace its SKU list;
/// SKUs no longer listed are detached, not deleted.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProductSubmission>,
) -> AppResult<impl IntoResponse> {
    let outcome = submit_product(&state.pool, Some(id), &input).await?;

    tracing::info!(
        product_id = id,
        created = outcome.created.len(),
        updated = outcome.updated.len(),
        skipped = outcome.skipped.len(),
        "Product updated"
    );

    let product = load_with_skus(&state, id).await?;
    Ok(Json(DataResponse {
        data: SubmissionResponse { product, outcome },
    }))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/products/{id}/drafts
///
/// Build the draft rows an edit form starts from: the product's stored SKUs
/// reconciled against the combinations of its stored attributes. Stored
/// attributes past the combination limit are refused rather than expanded.
pub async fn drafts(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = load_with_skus(&state, id).await?;
    let attributes = product.product.attributes.0;
    check_combination_limit(&attributes)?;

    let persisted: Vec<DraftSku> = SkuRepo::find_by_ids(&state.pool, &product.sku_ids)
        .await?
        .iter()
        .map(|sku| sku.to_draft())
        .collect();
    let skus = regenerate(&attributes, &persisted);

    Ok(Json(DataResponse {
        data: ProductDrafts {
            product_id: id,
            name: product.product.name,
            attributes,
            skus,
        },
    }))
}
