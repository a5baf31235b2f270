//! Repository for the `plants` table.

use sqlx::PgPool;

use harvestlog_core::types::DbId;

use crate::models::plant::{CreatePlant, Plant};

/// Column list for `plants` queries.
const PLANT_COLUMNS: &str = "id, owner_id, name, emoji, is_hidden, created_at, updated_at";

/// Provides catalog operations for plants.
pub struct PlantRepo;

impl PlantRepo {
    /// Create a plant owned by the given user.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreatePlant,
    ) -> Result<Plant, sqlx::Error> {
        let sql = format!(
            "INSERT INTO plants (owner_id, name, emoji) \
             VALUES ($1, $2, $3) \
             RETURNING {PLANT_COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&sql)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.emoji)
            .fetch_one(pool)
            .await
    }

    /// List the caller's visible plants in a stable order.
    ///
    /// The id ordering is what makes fuzzy-match tie-breaking deterministic,
    /// so it must not change casually.
    pub async fn list_visible(pool: &PgPool, owner_id: DbId) -> Result<Vec<Plant>, sqlx::Error> {
        let sql = format!(
            "SELECT {PLANT_COLUMNS} FROM plants \
             WHERE owner_id = $1 AND is_hidden = false \
             ORDER BY id"
        );
        sqlx::query_as::<_, Plant>(&sql)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }
}
