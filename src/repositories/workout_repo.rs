use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, TransactionBehavior};
use uuid::Uuid;

use crate::analytics::records::detect_personal_records;
use crate::analytics::{LiftSample, PersonalRecordHit, VolumeRow};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{
    query_all, query_optional, CreateWorkoutLog, ExerciseHistoryEntry, WorkoutLog,
    WorkoutLogEntry,
};

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // Workout logs

    /// Insert a log and its entries and flag personal records against the
    /// user's history, all inside one immediate transaction.
    pub async fn create_log(
        &self,
        user_id: &str,
        performed_on: NaiveDate,
        form: CreateWorkoutLog,
    ) -> Result<(WorkoutLog, Vec<PersonalRecordHit>)> {
        let log = WorkoutLog {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            routine_id: form.routine_id.filter(|r| !r.trim().is_empty()),
            performed_on,
            duration_minutes: form.duration_minutes,
            notes: form.notes.filter(|n| !n.trim().is_empty()),
            created_at: Utc::now(),
        };
        let log_clone = log.clone();
        let entries = form.entries;

        let pool = self.pool.clone();
        let records = tokio::task::spawn_blocking(move || -> Result<Vec<PersonalRecordHit>> {
            let mut conn = pool.get()?;
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            tx.execute(
                "INSERT INTO workout_logs
                    (id, user_id, routine_id, performed_on, duration_minutes, notes, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    log_clone.id,
                    log_clone.user_id,
                    log_clone.routine_id,
                    log_clone.performed_on,
                    log_clone.duration_minutes,
                    log_clone.notes,
                    log_clone.created_at
                ],
            )?;

            let mut samples = Vec::with_capacity(entries.len());
            for entry in entries {
                let entry_id = Uuid::new_v4().to_string();
                tx.execute(
                    "INSERT INTO workout_log_exercises
                        (id, workout_log_id, exercise_id, sets, reps, weight, is_pr)
                     VALUES (?, ?, ?, ?, ?, ?, 0)",
                    rusqlite::params![
                        entry_id,
                        log_clone.id,
                        entry.exercise_id,
                        entry.sets,
                        entry.reps,
                        entry.weight
                    ],
                )?;
                samples.push(LiftSample {
                    entry_id,
                    workout_log_id: log_clone.id.clone(),
                    exercise_id: entry.exercise_id,
                    weight: entry.weight,
                });
            }

            let history = lift_history(&tx, &log_clone.user_id, None)?;
            let records = detect_personal_records(&log_clone.id, &samples, &history);
            for record in &records {
                tx.execute(
                    "UPDATE workout_log_exercises SET is_pr = 1 WHERE id = ?",
                    [&record.entry_id],
                )?;
            }

            tx.commit()?;
            Ok(records)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok((log, records))
    }

    pub async fn find_log_by_id(&self, id: &str) -> Result<Option<WorkoutLog>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Option<WorkoutLog>> {
            let conn = pool.get()?;
            Ok(query_optional(
                &conn,
                "SELECT * FROM workout_logs WHERE id = ?",
                [&id],
            )?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_logs_by_user_paginated(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkoutLog>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<WorkoutLog>> {
            let conn = pool.get()?;
            Ok(query_all(
                &conn,
                "SELECT * FROM workout_logs WHERE user_id = ?
                 ORDER BY performed_on DESC, created_at DESC
                 LIMIT ? OFFSET ?",
                rusqlite::params![user_id, limit, offset],
            )?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count_logs_by_user(&self, user_id: &str) -> Result<i64> {
        self.count_logs_since(user_id, None).await
    }

    /// Number of logs on or after `since`, or all logs when `since` is `None`.
    pub async fn count_logs_since(&self, user_id: &str, since: Option<NaiveDate>) -> Result<i64> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<i64> {
            let conn = pool.get()?;
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM workout_logs
                 WHERE user_id = ?1 AND (?2 IS NULL OR performed_on >= ?2)",
                rusqlite::params![user_id, since],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete_log(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<bool> {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM workout_logs WHERE id = ? AND user_id = ?",
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    // Entries

    pub async fn find_entries_by_log(&self, workout_log_id: &str) -> Result<Vec<WorkoutLogEntry>> {
        let pool = self.pool.clone();
        let workout_log_id = workout_log_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<WorkoutLogEntry>> {
            let conn = pool.get()?;
            Ok(query_all(
                &conn,
                "SELECT wle.id, wle.workout_log_id, wle.exercise_id, e.name AS exercise_name,
                        e.muscle_group, wle.sets, wle.reps, wle.weight, wle.is_pr
                 FROM workout_log_exercises wle
                 JOIN exercises e ON e.id = wle.exercise_id
                 WHERE wle.workout_log_id = ?
                 ORDER BY wle.rowid",
                [&workout_log_id],
            )?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    // History for analytics

    /// Every logged weight of the user, optionally for a single exercise.
    pub async fn find_lift_history(
        &self,
        user_id: &str,
        exercise_id: Option<&str>,
    ) -> Result<Vec<LiftSample>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let exercise_id = exercise_id.map(str::to_string);
        tokio::task::spawn_blocking(move || -> Result<Vec<LiftSample>> {
            let conn = pool.get()?;
            Ok(lift_history(&conn, &user_id, exercise_id.as_deref())?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// All dates the user trained on, one per log (duplicates included).
    pub async fn find_workout_dates(&self, user_id: &str) -> Result<Vec<NaiveDate>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<NaiveDate>> {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT performed_on FROM workout_logs WHERE user_id = ?")?;
            let dates = stmt
                .query_map([&user_id], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<NaiveDate>>>()?;
            Ok(dates)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Entries flattened for volume aggregation, on or after `since` when set.
    pub async fn find_volume_rows(
        &self,
        user_id: &str,
        since: Option<NaiveDate>,
    ) -> Result<Vec<VolumeRow>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<VolumeRow>> {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT wl.performed_on, e.muscle_group, wle.sets, wle.reps, wle.weight
                 FROM workout_log_exercises wle
                 JOIN workout_logs wl ON wl.id = wle.workout_log_id
                 JOIN exercises e ON e.id = wle.exercise_id
                 WHERE wl.user_id = ?1 AND (?2 IS NULL OR wl.performed_on >= ?2)
                 ORDER BY wl.performed_on",
            )?;
            let rows = stmt
                .query_map(rusqlite::params![user_id, since], |row| {
                    Ok(VolumeRow {
                        performed_on: row.get(0)?,
                        muscle_group: row.get(1)?,
                        sets: row.get(2)?,
                        reps: row.get(3)?,
                        weight: row.get(4)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_exercise_history(
        &self,
        user_id: &str,
        exercise_id: &str,
        limit: i64,
    ) -> Result<Vec<ExerciseHistoryEntry>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let exercise_id = exercise_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<ExerciseHistoryEntry>> {
            let conn = pool.get()?;
            Ok(query_all(
                &conn,
                "SELECT wle.workout_log_id, wl.performed_on, wle.sets, wle.reps, wle.weight,
                        wle.is_pr
                 FROM workout_log_exercises wle
                 JOIN workout_logs wl ON wl.id = wle.workout_log_id
                 WHERE wl.user_id = ? AND wle.exercise_id = ?
                 ORDER BY wl.performed_on DESC, wl.created_at DESC
                 LIMIT ?",
                rusqlite::params![user_id, exercise_id, limit],
            )?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

fn lift_history(
    conn: &Connection,
    user_id: &str,
    exercise_id: Option<&str>,
) -> rusqlite::Result<Vec<LiftSample>> {
    let mut stmt = conn.prepare(
        "SELECT wle.id, wle.workout_log_id, wle.exercise_id, wle.weight
         FROM workout_log_exercises wle
         JOIN workout_logs wl ON wl.id = wle.workout_log_id
         WHERE wl.user_id = ?1 AND (?2 IS NULL OR wle.exercise_id = ?2)
         ORDER BY wl.performed_on, wl.created_at, wle.rowid",
    )?;
    let samples = stmt
        .query_map(rusqlite::params![user_id, exercise_id], |row| {
            Ok(LiftSample {
                entry_id: row.get(0)?,
                workout_log_id: row.get(1)?,
                exercise_id: row.get(2)?,
                weight: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(samples)
}
