pub mod attribute;
pub mod health;
pub mod product;
pub mod sku;
pub mod sku_draft;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /attributes                    list, create
/// /attributes/{id}               get, update, delete
///
/// /skus                          list, create
/// /skus/{id}                     get, update, delete
///
/// /products                      list (paged), submit new
/// /products/{id}                 get, resubmit, delete
/// /products/{id}/drafts          edit-form seed
///
/// /sku-drafts/regenerate         generate + reconcile draft rows
/// /sku-drafts/diff               compare drafts with persisted SKUs
/// /sku-drafts/resolve            map form references onto the catalog
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/attributes", attribute::router())
        .nest("/skus", sku::router())
        .nest("/products", product::router())
        .nest("/sku-drafts", sku_draft::router())
}
