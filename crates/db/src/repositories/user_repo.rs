//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const USER_COLUMNS: &str = "id, email, display_name, created_at, updated_at";

/// Provides provisioning operations for user rows.
pub struct UserRepo;

impl UserRepo {
    /// Create a user row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (email, display_name) \
             VALUES ($1, $2) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&input.email)
            .bind(&input.display_name)
            .fetch_one(pool)
            .await
    }
}
