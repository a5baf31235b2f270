//! CSV harvest import pipeline.
//!
//! Bulk-imports historical harvest records from a spreadsheet export. The
//! pipeline is pure and single-pass: an all-or-nothing column schema gate,
//! then per-row quantity/date parsing and plant-name resolution, producing a
//! three-bucket preview (matched / unmatched / errors) that the caller
//! resolves interactively before committing anything.
//!
//! - [`schema`] -- upload gate and raw row extraction
//! - [`date`] -- permissive `M/D/Y` date normalization
//! - [`resolve`] -- exact and fuzzy plant-name resolution
//! - [`classify`] -- per-row classification into the preview buckets

pub mod classify;
pub mod date;
pub mod resolve;
pub mod schema;

pub use classify::{
    classify_rows, parse_quantity, ErrorField, ErrorRow, MatchedRow, PlantSuggestion,
    PreviewResult, UnmatchedRow,
};
pub use date::parse_harvest_date;
pub use resolve::{levenshtein, normalize_plant_name, resolve_plant_name, NameMatch};
pub use schema::{
    extract_rows, validate_csv_upload, RawRow, COLUMN_DATE, COLUMN_PLANT_NAME, COLUMN_QUANTITY,
    REQUIRED_COLUMNS,
};

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Unit recorded on every imported harvest. The import format is ounces.
pub const IMPORT_UNIT: &str = "oz";

/// Maximum Levenshtein distance at which a catalog entry is still offered
/// as a fuzzy suggestion for an unmatched plant name.
pub const FUZZY_DISTANCE_THRESHOLD: usize = 3;

// ---------------------------------------------------------------------------
// Catalog input
// ---------------------------------------------------------------------------

/// A plant catalog entry as seen by the import pipeline.
///
/// The catalog itself lives in the database; the pipeline receives a
/// read-only snapshot of the caller's visible plants and never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPlant {
    pub id: DbId,
    pub name: String,
    pub emoji: String,
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// Build the downloadable CSV template: the exact required header row plus
/// one example row showing the expected cell shapes.
pub fn template_csv() -> String {
    format!(
        "{COLUMN_PLANT_NAME},{COLUMN_DATE},{COLUMN_QUANTITY}\nTomato,6/15/2025,8\n"
    )
}
