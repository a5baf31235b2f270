//! Handlers for the plant catalog.

use axum::extract::State;
use axum::Json;

use harvestlog_db::models::plant::Plant;
use harvestlog_db::repositories::PlantRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/plants
///
/// List the caller's visible plants -- the catalog that CSV imports are
/// reconciled against and that the resolution UI picks overrides from.
pub async fn list_plants(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Plant>>>> {
    let plants = PlantRepo::list_visible(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: plants }))
}
