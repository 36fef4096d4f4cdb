//! Route definitions for products.

use axum::routing::get;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /              -> list (paged)
/// POST   /              -> create (full submission)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (full submission)
/// DELETE /{id}          -> delete
/// GET    /{id}/drafts   -> drafts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .route("/{id}/drafts", get(product::drafts))
}
