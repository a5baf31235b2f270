pub mod harvest_import;
pub mod health;
pub mod plants;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /plants                            list visible plants (auth required)
///
/// /harvests/import/preview           classify an uploaded CSV (multipart, auth required)
/// /harvests/import/commit            persist resolved rows (auth required)
/// /harvests/import/template          download the CSV template (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/harvests/import", harvest_import::router())
        .merge(plants::router())
}
