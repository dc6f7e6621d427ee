use chrono::Utc;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{query_all, User};

#[derive(Clone)]
pub struct SocialRepository {
    pool: DbPool,
}

impl SocialRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Follow a user. Following someone twice is a no-op; returns whether a
    /// new row was written.
    pub async fn follow(&self, follower_id: &str, following_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let follower_id = follower_id.to_string();
        let following_id = following_id.to_string();
        let now = Utc::now();
        tokio::task::spawn_blocking(move || -> Result<bool> {
            let conn = pool.get()?;
            let rows = conn.execute(
                "INSERT OR IGNORE INTO user_followers (follower_id, following_id, created_at)
                 VALUES (?, ?, ?)",
                rusqlite::params![follower_id, following_id, now],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn unfollow(&self, follower_id: &str, following_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let follower_id = follower_id.to_string();
        let following_id = following_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<bool> {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM user_followers WHERE follower_id = ? AND following_id = ?",
                rusqlite::params![follower_id, following_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_following(&self, follower_id: &str) -> Result<Vec<User>> {
        let pool = self.pool.clone();
        let follower_id = follower_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<User>> {
            let conn = pool.get()?;
            Ok(query_all(
                &conn,
                "SELECT u.* FROM user_followers f
                 JOIN users u ON u.id = f.following_id
                 WHERE f.follower_id = ?
                 ORDER BY u.username",
                [&follower_id],
            )?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
