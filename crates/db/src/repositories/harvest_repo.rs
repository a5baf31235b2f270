//! Repository for the `harvests` table.
//!
//! Inserts are blind: there is no dedup key, so committing the same import
//! twice stores two records. Retry protection is the caller's concern.

use sqlx::PgPool;

use crate::models::harvest::{CreateHarvest, Harvest};

/// Column list for `harvests` queries.
const HARVEST_COLUMNS: &str =
    "id, owner_id, plant_id, quantity, unit, harvested_at, created_at, updated_at";

/// Provides insert operations for harvest records.
pub struct HarvestRepo;

impl HarvestRepo {
    /// Insert one harvest record.
    pub async fn create(pool: &PgPool, input: &CreateHarvest) -> Result<Harvest, sqlx::Error> {
        let sql = format!(
            "INSERT INTO harvests (owner_id, plant_id, quantity, unit, harvested_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {HARVEST_COLUMNS}"
        );
        sqlx::query_as::<_, Harvest>(&sql)
            .bind(input.owner_id)
            .bind(input.plant_id)
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(input.harvested_at)
            .fetch_one(pool)
            .await
    }
}
