//! User models.
//!
//! Account lifecycle (signup, login, tokens) belongs to the external auth
//! service; this crate only stores the rows that plants and harvests
//! reference as their owner.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use harvestlog_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for provisioning a user row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub display_name: String,
}
