//! Row classification: sorts parsed CSV rows into matched / unmatched /
//! errored.
//!
//! Every raw row lands in exactly one of the three preview buckets. Quantity
//! and date are parsed first and a failure there excludes the row from name
//! matching entirely -- malformed rows are reported, never coerced. The
//! classification is pure and repeatable: re-uploading the same file yields
//! the same preview.

use serde::{Deserialize, Serialize};

use super::date::parse_harvest_date;
use super::resolve::{resolve_plant_name, NameMatch};
use super::schema::RawRow;
use super::CanonicalPlant;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Preview payload types
// ---------------------------------------------------------------------------

/// A row whose plant name matched the catalog exactly and whose date and
/// quantity both parsed. Safe to import without further confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedRow {
    pub row_number: u32,
    pub plant_id: DbId,
    pub plant_name: String,
    pub plant_emoji: String,
    pub harvested_at: Timestamp,
    pub quantity: f64,
}

/// The catalog entry offered as a fuzzy suggestion for an unmatched name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantSuggestion {
    pub plant_id: DbId,
    pub plant_name: String,
    pub plant_emoji: String,
}

/// A row with a valid date and quantity but no exact plant-name match.
/// Awaits a human decision: accept the suggestion, pick another plant, or
/// skip the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedRow {
    pub row_number: u32,
    pub raw_name: String,
    pub suggestion: Option<PlantSuggestion>,
    pub harvested_at: Timestamp,
    pub quantity: f64,
}

/// Which cell of a row failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorField {
    Date,
    Quantity,
}

impl ErrorField {
    /// Stable string representation matching serde's `rename_all = "snake_case"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Quantity => "quantity",
        }
    }
}

/// A row excluded from reconciliation because its date or quantity did not
/// parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRow {
    pub row_number: u32,
    pub field: ErrorField,
    pub message: String,
}

/// The full classification result shown to the user before anything is
/// persisted.
///
/// Invariant: every raw row number appears in exactly one of the three
/// buckets, so `matched + unmatched + errors` always adds up to
/// `total_rows`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResult {
    pub total_rows: usize,
    pub matched: Vec<MatchedRow>,
    pub unmatched: Vec<UnmatchedRow>,
    pub errors: Vec<ErrorRow>,
}

// ---------------------------------------------------------------------------
// Quantity parsing
// ---------------------------------------------------------------------------

/// Parse a quantity cell into a finite, non-negative number of ounces.
pub fn parse_quantity(text: &str) -> Result<f64, String> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("Invalid quantity '{trimmed}': expected a number"))?;
    if !value.is_finite() {
        return Err(format!("Invalid quantity '{trimmed}': must be a finite number"));
    }
    if value < 0.0 {
        return Err(format!("Invalid quantity '{trimmed}': must not be negative"));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify every raw row against the caller's plant catalog.
///
/// Per row, in order: quantity, date, then name resolution. A quantity or
/// date failure is reported for that field even when the plant name would
/// have matched.
pub fn classify_rows(rows: &[RawRow], catalog: &[CanonicalPlant]) -> PreviewResult {
    let mut preview = PreviewResult {
        total_rows: rows.len(),
        matched: Vec::new(),
        unmatched: Vec::new(),
        errors: Vec::new(),
    };

    for row in rows {
        let quantity = match parse_quantity(&row.quantity_text) {
            Ok(quantity) => quantity,
            Err(message) => {
                preview.errors.push(ErrorRow {
                    row_number: row.row_number,
                    field: ErrorField::Quantity,
                    message,
                });
                continue;
            }
        };

        let harvested_at = match parse_harvest_date(&row.date_text) {
            Ok(harvested_at) => harvested_at,
            Err(message) => {
                preview.errors.push(ErrorRow {
                    row_number: row.row_number,
                    field: ErrorField::Date,
                    message,
                });
                continue;
            }
        };

        match resolve_plant_name(&row.plant_name_text, catalog) {
            NameMatch::Exact(plant) => preview.matched.push(MatchedRow {
                row_number: row.row_number,
                plant_id: plant.id,
                plant_name: plant.name.clone(),
                plant_emoji: plant.emoji.clone(),
                harvested_at,
                quantity,
            }),
            NameMatch::Suggestion { plant, .. } => preview.unmatched.push(UnmatchedRow {
                row_number: row.row_number,
                raw_name: row.plant_name_text.clone(),
                suggestion: Some(PlantSuggestion {
                    plant_id: plant.id,
                    plant_name: plant.name.clone(),
                    plant_emoji: plant.emoji.clone(),
                }),
                harvested_at,
                quantity,
            }),
            NameMatch::Unknown => preview.unmatched.push(UnmatchedRow {
                row_number: row.row_number,
                raw_name: row.plant_name_text.clone(),
                suggestion: None,
                harvested_at,
                quantity,
            }),
        }
    }

    preview
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
