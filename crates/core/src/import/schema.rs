//! Upload gate and raw row extraction for the harvest CSV import.
//!
//! The importer accepts a single fixed 3-column schema. The gate is
//! all-or-nothing: a wrong file type or a missing required column fails the
//! whole request before any row is processed, so a rejected upload never
//! produces a partial preview.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

/// Header name of the plant-name column.
pub const COLUMN_PLANT_NAME: &str = "Plant Name";

/// Header name of the harvest-date column.
pub const COLUMN_DATE: &str = "Date";

/// Header name of the quantity column. The unit is part of the header.
pub const COLUMN_QUANTITY: &str = "Quantity (oz)";

/// All required columns, in the order they are reported when missing.
pub const REQUIRED_COLUMNS: &[&str] = &[COLUMN_PLANT_NAME, COLUMN_DATE, COLUMN_QUANTITY];

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// One CSV data line, untouched by any parsing.
///
/// `row_number` is 1-based and excludes the header row, so it matches what a
/// user sees when they open the file in a spreadsheet minus the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: u32,
    pub plant_name_text: String,
    pub date_text: String,
    pub quantity_text: String,
}

// ---------------------------------------------------------------------------
// Upload gate
// ---------------------------------------------------------------------------

/// Check that an upload's filename or declared content type indicates CSV.
pub fn validate_csv_upload(file_name: &str, content_type: Option<&str>) -> Result<(), CoreError> {
    let name_is_csv = file_name.to_lowercase().ends_with(".csv");
    let type_is_csv = matches!(content_type, Some("text/csv" | "application/csv"));

    if name_is_csv || type_is_csv {
        Ok(())
    } else {
        Err(CoreError::Validation("File must be a CSV".to_string()))
    }
}

/// Parse the upload into raw rows.
///
/// Validates the header first: every required column must be present under
/// its exact (case-sensitive) name, and a missing column rejects the whole
/// file naming that column. Cells are then read by header position, so
/// column order is irrelevant and extra columns are ignored. Short records
/// yield empty cells rather than an error; the per-row parsers decide what
/// an empty cell means.
pub fn extract_rows(bytes: &[u8]) -> Result<Vec<RawRow>, CoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| CoreError::Validation(format!("Unreadable CSV header: {e}")))?
        .clone();

    let column_index = |name: &str| headers.iter().position(|h| h == name);
    for required in REQUIRED_COLUMNS {
        if column_index(required).is_none() {
            return Err(CoreError::Validation(format!(
                "Missing required column: {required}"
            )));
        }
    }

    // Presence was just verified; the positions are safe to take.
    let name_idx = column_index(COLUMN_PLANT_NAME).unwrap_or_default();
    let date_idx = column_index(COLUMN_DATE).unwrap_or_default();
    let quantity_idx = column_index(COLUMN_QUANTITY).unwrap_or_default();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            CoreError::Validation(format!("Malformed CSV on data row {}: {e}", i + 1))
        })?;
        rows.push(RawRow {
            row_number: (i + 1) as u32,
            plant_name_text: record.get(name_idx).unwrap_or_default().to_string(),
            date_text: record.get(date_idx).unwrap_or_default().to_string(),
            quantity_text: record.get(quantity_idx).unwrap_or_default().to_string(),
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
