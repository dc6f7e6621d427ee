use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{query_all, query_optional, CreateExercise, Exercise};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Option<Exercise>> {
            let conn = pool.get()?;
            Ok(query_optional(&conn, "SELECT * FROM exercises WHERE id = ?", [&id])?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Built-in exercises plus the user's own.
    pub async fn find_available_for_user(&self, user_id: &str) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<Exercise>> {
            let conn = pool.get()?;
            Ok(query_all(
                &conn,
                "SELECT * FROM exercises
                 WHERE user_id IS NULL OR user_id = ?
                 ORDER BY muscle_group, name",
                [&user_id],
            )?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Whether the name clashes with an exercise the user can already see.
    pub async fn name_taken(&self, user_id: &str, name: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || -> Result<bool> {
            let conn = pool.get()?;
            let found: Option<String> = conn
                .query_row(
                    "SELECT id FROM exercises
                     WHERE LOWER(name) = LOWER(?1) AND (user_id IS NULL OR user_id = ?2)
                     LIMIT 1",
                    rusqlite::params![name, user_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, user_id: &str, form: &CreateExercise) -> Result<Exercise> {
        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            name: form.name.trim().to_string(),
            muscle_group: form.muscle_group.clone(),
            equipment: form
                .equipment
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            user_id: Some(user_id.to_string()),
        };
        let exercise_clone = exercise.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO exercises (id, name, muscle_group, equipment, user_id)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    exercise_clone.id,
                    exercise_clone.name,
                    exercise_clone.muscle_group,
                    exercise_clone.equipment,
                    exercise_clone.user_id
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(exercise)
    }
}
