use chrono::Utc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{query_all, CreateGoal, Goal};

#[derive(Clone)]
pub struct GoalRepository {
    pool: DbPool,
}

impl GoalRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: &str, form: &CreateGoal) -> Result<Goal> {
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: form.title.trim().to_string(),
            kind: form.kind,
            exercise_id: form.exercise_id.clone(),
            target_value: form.target_value,
            deadline: form.deadline,
            created_at: Utc::now(),
        };
        let goal_clone = goal.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO goals
                    (id, user_id, title, kind, exercise_id, target_value, deadline, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    goal_clone.id,
                    goal_clone.user_id,
                    goal_clone.title,
                    goal_clone.kind.as_str(),
                    goal_clone.exercise_id,
                    goal_clone.target_value,
                    goal_clone.deadline,
                    goal_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(goal)
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Goal>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<Goal>> {
            let conn = pool.get()?;
            Ok(query_all(
                &conn,
                "SELECT * FROM goals WHERE user_id = ?
                 ORDER BY deadline IS NULL, deadline, created_at",
                [&user_id],
            )?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<bool> {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM goals WHERE id = ? AND user_id = ?",
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
