//! Handlers for the harvest CSV importer.
//!
//! Provides the import preview (multipart CSV upload), the bulk commit of
//! resolved rows, and the CSV template download. Preview and commit are both
//! stateless: the interactive resolution between them (accept suggestion,
//! pick another plant, skip) lives entirely in the client session, and the
//! resolved row list is round-tripped back in the commit request.

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use harvestlog_core::error::CoreError;
use harvestlog_core::import::{
    classify_rows, extract_rows, template_csv, validate_csv_upload, CanonicalPlant,
    PreviewResult, IMPORT_UNIT,
};
use harvestlog_core::types::{DbId, Timestamp};
use harvestlog_db::models::harvest::{CreateHarvest, Harvest};
use harvestlog_db::models::plant::Plant;
use harvestlog_db::repositories::{HarvestRepo, PlantRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ── Preview ──────────────────────────────────────────────────────────

/// POST /api/v1/harvests/import/preview
///
/// Accept a multipart upload with a single CSV `file` field, validate the
/// column schema, and classify every row against the caller's plant catalog.
/// Nothing is persisted; re-uploading the same file yields the same preview.
pub async fn preview_import(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<PreviewResult>>> {
    let upload = read_file_field(&mut multipart).await?;
    validate_csv_upload(&upload.file_name, upload.content_type.as_deref())?;

    let rows = extract_rows(&upload.bytes)?;

    let catalog: Vec<CanonicalPlant> = PlantRepo::list_visible(&state.pool, user.user_id)
        .await?
        .iter()
        .map(Plant::to_canonical)
        .collect();

    let preview = classify_rows(&rows, &catalog);
    tracing::info!(
        user_id = user.user_id,
        total_rows = preview.total_rows,
        matched = preview.matched.len(),
        unmatched = preview.unmatched.len(),
        errors = preview.errors.len(),
        "Classified harvest import upload"
    );

    Ok(Json(DataResponse { data: preview }))
}

// ── Commit ───────────────────────────────────────────────────────────

/// One resolved row the caller wants persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequestRow {
    pub plant_id: DbId,
    pub harvested_at: Timestamp,
    pub quantity: f64,
}

/// Request body for the bulk commit.
#[derive(Debug, Deserialize)]
pub struct CommitRequest {
    pub rows: Vec<ImportRequestRow>,
}

/// Result of a bulk commit.
#[derive(Debug, Serialize)]
pub struct CommitResult {
    pub imported: usize,
    pub harvests: Vec<Harvest>,
}

/// POST /api/v1/harvests/import/commit
///
/// Persist the resolved row set as harvest records owned by the caller,
/// with the unit fixed to the import format's ounces. Rows are independent
/// blind inserts: there is no dedup key and no cross-row transaction, and
/// the first failing insert aborts the call.
pub async fn commit_import(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CommitRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CommitResult>>)> {
    if body.rows.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Import rows must not be empty".to_string(),
        )));
    }

    let mut harvests = Vec::with_capacity(body.rows.len());
    for row in &body.rows {
        let harvest = HarvestRepo::create(
            &state.pool,
            &CreateHarvest {
                owner_id: user.user_id,
                plant_id: row.plant_id,
                quantity: row.quantity,
                unit: IMPORT_UNIT.to_string(),
                harvested_at: row.harvested_at,
            },
        )
        .await?;
        harvests.push(harvest);
    }

    tracing::info!(
        user_id = user.user_id,
        imported = harvests.len(),
        "Committed harvest import"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CommitResult {
                imported: harvests.len(),
                harvests,
            },
        }),
    ))
}

// ── Template ─────────────────────────────────────────────────────────

/// GET /api/v1/harvests/import/template
///
/// Download a CSV whose header row is exactly the required columns, so
/// users know the expected shape before exporting their spreadsheet.
pub async fn download_template(
    _user: AuthUser,
) -> ([(header::HeaderName, &'static str); 2], String) {
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"harvest_import_template.csv\"",
            ),
        ],
        template_csv(),
    )
}

// ── Private helpers ──────────────────────────────────────────────────

/// The single file field of a multipart upload.
struct FileUpload {
    file_name: String,
    content_type: Option<String>,
    bytes: axum::body::Bytes,
}

/// Pull the `file` field out of a multipart request.
async fn read_file_field(multipart: &mut Multipart) -> Result<FileUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        return Ok(FileUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::BadRequest(
        "Missing 'file' field in multipart upload".to_string(),
    ))
}
