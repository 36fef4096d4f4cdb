//! Handlers for the `/attributes` resource.
//!
//! The attribute catalog lists the named attributes (with candidate values)
//! that product forms offer for selection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitrine_core::catalog::{validate_attribute_name, validate_attribute_values};
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::attribute::{CreateAttribute, UpdateAttribute};
use vitrine_db::repositories::AttributeRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Attribute",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/attributes
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let attributes = AttributeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: attributes }))
}

/// GET /api/v1/attributes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let attribute = AttributeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: attribute }))
}

/// POST /api/v1/attributes
///
/// Create a catalog attribute. Names are unique; a duplicate returns 409.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAttribute>,
) -> AppResult<impl IntoResponse> {
    validate_attribute_name(&input.name)?;
    validate_attribute_values(&input.values)?;

    let input = CreateAttribute {
        name: input.name.trim().to_string(),
        values: input.values,
    };
    let attribute = AttributeRepo::create(&state.pool, &input).await?;

    tracing::info!(
        attribute_id = attribute.id,
        name = %attribute.name,
        value_count = attribute.values.len(),
        "Attribute created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: attribute })))
}

/// PUT /api/v1/attributes/{id}
///
/// Partial update; omitted fields keep their stored value.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAttribute>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_attribute_name(name)?;
    }
    if let Some(values) = &input.values {
        validate_attribute_values(values)?;
    }

    let input = UpdateAttribute {
        name: input.name.map(|n| n.trim().to_string()),
        values: input.values,
    };
    let attribute = AttributeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(attribute_id = id, "Attribute updated");

    Ok(Json(DataResponse { data: attribute }))
}

/// DELETE /api/v1/attributes/{id}
///
/// Products keep their own copy of selected attribute rows, so deleting a
/// catalog entry leaves existing products untouched.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AttributeRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(attribute_id = id, "Attribute deleted");
    Ok(StatusCode::NO_CONTENT)
}
