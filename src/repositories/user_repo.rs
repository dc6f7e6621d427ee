use chrono::Utc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{query_optional, User};

/// Profiles are provisioned alongside the identity provider's accounts.
#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Option<User>> {
            let conn = pool.get()?;
            Ok(query_optional(&conn, "SELECT * FROM users WHERE id = ?", [&id])?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, username: &str, display_name: Option<&str>) -> Result<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            display_name: display_name.map(str::to_string),
            created_at: Utc::now(),
        };
        let user_clone = user.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO users (id, username, display_name, created_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![
                    user_clone.id,
                    user_clone.username,
                    user_clone.display_name,
                    user_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        tracing::info!(user_id = %user.id, "Created profile {}", user.username);
        Ok(user)
    }
}
