//! Route definitions for SKUs.

use axum::routing::get;
use axum::Router;

use crate::handlers::sku;
use crate::state::AppState;

/// Routes mounted at `/skus`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sku::list).post(sku::create))
        .route(
            "/{id}",
            get(sku::get_by_id).put(sku::update).delete(sku::delete),
        )
}
