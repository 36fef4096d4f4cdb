//! Handlers for the `/skus` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitrine_core::catalog::validate_price;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::sku::{CreateSku, UpdateSku};
use vitrine_db::repositories::SkuRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Sku", id })
}

fn validate_model(model: &str) -> Result<(), CoreError> {
    if model.trim().is_empty() {
        return Err(CoreError::Validation("Model is required".to_string()));
    }
    Ok(())
}

fn validate_stock_count(stock: i32) -> Result<(), CoreError> {
    if stock < 0 {
        return Err(CoreError::Validation(format!(
            "Stock must be a non-negative whole number, got {stock}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/skus
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let skus = SkuRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: skus }))
}

/// GET /api/v1/skus/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sku = SkuRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: sku }))
}

/// POST /api/v1/skus
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSku>,
) -> AppResult<impl IntoResponse> {
    validate_model(&input.model)?;
    validate_price(&input.price)?;
    validate_stock_count(input.number_in_stock)?;

    let sku = SkuRepo::create(&state.pool, &input).await?;
    tracing::info!(sku_id = sku.id, model = %sku.model, "SKU created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: sku })))
}

/// PUT /api/v1/skus/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSku>,
) -> AppResult<impl IntoResponse> {
    if let Some(model) = &input.model {
        validate_model(model)?;
    }
    if let Some(price) = &input.price {
        validate_price(price)?;
    }
    if let Some(stock) = input.number_in_stock {
        validate_stock_count(stock)?;
    }

    let sku = SkuRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(sku_id = id, "SKU updated");

    Ok(Json(DataResponse { data: sku }))
}

/// DELETE /api/v1/skus/{id}
///
/// Also detaches the SKU from every product that referenced it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SkuRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(sku_id = id, "SKU deleted");
    Ok(StatusCode::NO_CONTENT)
}
