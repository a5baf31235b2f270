//! Harvest record models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use harvestlog_core::types::{DbId, Timestamp};

/// A row from the `harvests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Harvest {
    pub id: DbId,
    pub owner_id: DbId,
    pub plant_id: DbId,
    pub quantity: f64,
    pub unit: String,
    pub harvested_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting one harvest record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHarvest {
    pub owner_id: DbId,
    pub plant_id: DbId,
    pub quantity: f64,
    pub unit: String,
    pub harvested_at: Timestamp,
}
