//! Route definitions for the plant catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::plants;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// GET    /plants    -> list_plants
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/plants", get(plants::list_plants))
}
