use chrono::Utc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::routine::move_item;
use crate::models::{
    query_all, query_optional, AddRoutineExercise, CreateRoutine, Routine, RoutineExercise,
};

#[derive(Clone)]
pub struct RoutineRepository {
    pool: DbPool,
}

impl RoutineRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: &str, form: &CreateRoutine) -> Result<Routine> {
        let routine = Routine {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: form.name.trim().to_string(),
            notes: form.notes.clone().filter(|n| !n.trim().is_empty()),
            created_at: Utc::now(),
        };
        let routine_clone = routine.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO routines (id, user_id, name, notes, created_at)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    routine_clone.id,
                    routine_clone.user_id,
                    routine_clone.name,
                    routine_clone.notes,
                    routine_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(routine)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Routine>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Option<Routine>> {
            let conn = pool.get()?;
            Ok(query_optional(&conn, "SELECT * FROM routines WHERE id = ?", [&id])?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Routine>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<Routine>> {
            let conn = pool.get()?;
            Ok(query_all(
                &conn,
                "SELECT * FROM routines WHERE user_id = ? ORDER BY name",
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
                "DELETE FROM routines WHERE id = ? AND user_id = ?",
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    // Routine exercises

    pub async fn find_exercises(&self, routine_id: &str) -> Result<Vec<RoutineExercise>> {
        let pool = self.pool.clone();
        let routine_id = routine_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<RoutineExercise>> {
            let conn = pool.get()?;
            Ok(query_all(
                &conn,
                "SELECT re.id, re.routine_id, re.exercise_id, e.name AS exercise_name,
                        re.position, re.sets, re.reps, re.weight, re.superset_group
                 FROM routine_exercises re
                 JOIN exercises e ON e.id = re.exercise_id
                 WHERE re.routine_id = ?
                 ORDER BY re.position",
                [&routine_id],
            )?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Append an exercise after the current last position.
    pub async fn add_exercise(&self, routine_id: &str, form: &AddRoutineExercise) -> Result<()> {
        let pool = self.pool.clone();
        let id = Uuid::new_v4().to_string();
        let routine_id = routine_id.to_string();
        let exercise_id = form.exercise_id.clone();
        let (sets, reps, weight, superset_group) =
            (form.sets, form.reps, form.weight, form.superset_group);

        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let position: i32 = tx.query_row(
                "SELECT COUNT(*) FROM routine_exercises WHERE routine_id = ?",
                [&routine_id],
                |row| row.get(0),
            )?;
            tx.execute(
                "INSERT INTO routine_exercises
                    (id, routine_id, exercise_id, position, sets, reps, weight, superset_group)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    id,
                    routine_id,
                    exercise_id,
                    position,
                    sets,
                    reps,
                    weight,
                    superset_group
                ],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Move the exercise at position `from` to `to` and renumber the rest so
    /// positions stay 0..n. Returns `false` when either position is out of
    /// range.
    pub async fn reorder(&self, routine_id: &str, from: usize, to: usize) -> Result<bool> {
        let pool = self.pool.clone();
        let routine_id = routine_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<bool> {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let mut ids = {
                let mut stmt = tx.prepare(
                    "SELECT id FROM routine_exercises WHERE routine_id = ? ORDER BY position",
                )?;
                let ids = stmt
                    .query_map([&routine_id], |row| row.get::<_, String>(0))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                ids
            };

            if !move_item(&mut ids, from, to) {
                return Ok(false);
            }

            for (position, id) in ids.iter().enumerate() {
                tx.execute(
                    "UPDATE routine_exercises SET position = ? WHERE id = ?",
                    rusqlite::params![position as i64, id],
                )?;
            }
            tx.commit()?;
            Ok(true)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
