use axum::routing::post;
use axum::Router;

use crate::handlers::sku_draft;
use crate::state::AppState;

/// Routes mounted at `/sku-drafts`.
///
/// ```text
/// POST /regenerate -> regenerate_drafts
/// POST /diff       -> diff
/// POST /resolve    -> resolve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/regenerate", post(sku_draft::regenerate_drafts))
        .route("/diff", post(sku_draft::diff))
        .route("/resolve", post(sku_draft::resolve))
}
