//! Route definitions for the harvest CSV importer.
//!
//! Mounted at `/harvests/import`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::harvest_import;
use crate::state::AppState;

/// Routes mounted at `/harvests/import`.
///
/// ```text
/// POST   /preview    -> preview_import    (multipart)
/// POST   /commit     -> commit_import
/// GET    /template   -> download_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/preview", post(harvest_import::preview_import))
        .route("/commit", post(harvest_import::commit_import))
        .route("/template", get(harvest_import::download_template))
}
