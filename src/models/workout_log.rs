use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;
use crate::analytics::records::PersonalRecordHit;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: String,
    pub user_id: String,
    pub routine_id: Option<String>,
    pub performed_on: NaiveDate,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for WorkoutLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            routine_id: row.get("routine_id")?,
            performed_on: row.get("performed_on")?,
            duration_minutes: row.get("duration_minutes")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// One exercise inside a workout log, joined with its exercise.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutLogEntry {
    pub id: String,
    pub workout_log_id: String,
    pub exercise_id: String,
    pub exercise_name: String,
    pub muscle_group: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub is_pr: bool,
}

impl WorkoutLogEntry {
    pub fn volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight
    }
}

impl FromSqliteRow for WorkoutLogEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_log_id: row.get("workout_log_id")?,
            exercise_id: row.get("exercise_id")?,
            exercise_name: row.get("exercise_name")?,
            muscle_group: row.get("muscle_group")?,
            sets: row.get("sets")?,
            reps: row.get("reps")?,
            weight: row.get("weight")?,
            is_pr: row.get("is_pr")?,
        })
    }
}

/// One appearance of an exercise in the user's history.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseHistoryEntry {
    pub workout_log_id: String,
    pub performed_on: NaiveDate,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub is_pr: bool,
}

impl FromSqliteRow for ExerciseHistoryEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            workout_log_id: row.get("workout_log_id")?,
            performed_on: row.get("performed_on")?,
            sets: row.get("sets")?,
            reps: row.get("reps")?,
            weight: row.get("weight")?,
            is_pr: row.get("is_pr")?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct WorkoutLogDetail {
    #[serde(flatten)]
    pub log: WorkoutLog,
    pub entries: Vec<WorkoutLogEntry>,
    pub total_volume: f64,
}

impl WorkoutLogDetail {
    pub fn new(log: WorkoutLog, entries: Vec<WorkoutLogEntry>) -> Self {
        let total_volume = entries.iter().map(WorkoutLogEntry::volume).sum();
        Self {
            log,
            entries,
            total_volume,
        }
    }
}

/// Result of logging a workout: the stored log plus any records it set.
#[derive(Debug, Serialize)]
pub struct CreatedWorkoutLog {
    #[serde(flatten)]
    pub detail: WorkoutLogDetail,
    pub personal_records: Vec<PersonalRecordHit>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutLogEntry {
    pub exercise_id: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutLog {
    /// Defaults to today when omitted.
    pub performed_on: Option<NaiveDate>,
    pub routine_id: Option<String>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub entries: Vec<CreateWorkoutLogEntry>,
}

impl CreateWorkoutLog {
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(AppError::Validation(
                "Add at least one exercise to the workout".to_string(),
            ));
        }

        for entry in &self.entries {
            if entry.exercise_id.trim().is_empty() {
                return Err(AppError::Validation("Exercise is required".to_string()));
            }
            if entry.sets < 1 || entry.reps < 1 {
                return Err(AppError::Validation(
                    "Sets and reps must be at least 1".to_string(),
                ));
            }
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(AppError::Validation(
                    "Weight must be zero or more".to_string(),
                ));
            }
        }

        if matches!(self.duration_minutes, Some(d) if d < 0) {
            return Err(AppError::Validation(
                "Duration cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}
