//! Plant catalog models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use harvestlog_core::import::CanonicalPlant;
use harvestlog_core::types::{DbId, Timestamp};

/// A row from the `plants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plant {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub emoji: String,
    pub is_hidden: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Plant {
    /// The catalog view of this plant consumed by the import pipeline.
    pub fn to_canonical(&self) -> CanonicalPlant {
        CanonicalPlant {
            id: self.id,
            name: self.name.clone(),
            emoji: self.emoji.clone(),
        }
    }
}

/// DTO for creating a plant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlant {
    pub name: String,
    pub emoji: String,
}
