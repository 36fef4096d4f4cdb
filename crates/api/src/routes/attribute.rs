//! Route definitions for the attribute catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::attribute;
use crate::state::AppState;

/// Routes mounted at `/attributes`.
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
        .route("/", get(attribute::list).post(attribute::create))
        .route(
            "/{id}",
            get(attribute::get_by_id)
                .put(attribute::update)
                .delete(attribute::delete),
        )
}
