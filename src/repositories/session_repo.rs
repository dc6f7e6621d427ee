use chrono::{DateTime, Duration, Utc};
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, User};

pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct SessionRepository {
    pool: DbPool,
}

impl SessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Issue a session for a user with the default lifetime. Returns the token.
    pub async fn create(&self, user_id: &str) -> Result<String> {
        self.create_with_ttl(user_id, Duration::days(SESSION_TTL_DAYS))
            .await
    }

    pub async fn create_with_ttl(&self, user_id: &str, ttl: Duration) -> Result<String> {
        let pool = self.pool.clone();
        let token = Uuid::new_v4().to_string();
        let user_id = user_id.to_string();
        let now = Utc::now();
        let expires_at = now + ttl;

        tokio::task::spawn_blocking(move || -> Result<String> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![token, user_id, now, expires_at],
            )?;
            Ok(token)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Resolve a token to its user. An expired session is deleted and treated
    /// as missing.
    pub async fn find_user(&self, token: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let token = token.to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || -> Result<Option<User>> {
            let conn = pool.get()?;
            let found: Option<(User, DateTime<Utc>)> = conn
                .query_row(
                    "SELECT u.*, s.expires_at AS session_expires_at
                     FROM sessions s
                     JOIN users u ON u.id = s.user_id
                     WHERE s.token = ?",
                    [&token],
                    |row| Ok((User::from_row(row)?, row.get("session_expires_at")?)),
                )
                .optional()?;

            match found {
                Some((_, expires_at)) if expires_at <= now => {
                    conn.execute("DELETE FROM sessions WHERE token = ?", [&token])?;
                    Ok(None)
                }
                Some((user, _)) => Ok(Some(user)),
                None => Ok(None),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Batch delete all expired sessions. Returns how many were removed.
    pub async fn cleanup_expired(&self) -> Result<usize> {
        let pool = self.pool.clone();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || -> Result<usize> {
            let conn = pool.get()?;
            let removed = conn.execute(
                "DELETE FROM sessions WHERE expires_at <= ?",
                rusqlite::params![now],
            )?;
            Ok(removed)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
