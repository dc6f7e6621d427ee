use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;
use crate::analytics::goals::GoalProgress;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    /// Best weight lifted on one exercise.
    ExerciseWeight,
    /// Workouts logged since the goal was set.
    WorkoutCount,
    /// Current streak in days.
    Streak,
}

impl GoalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalKind::ExerciseWeight => "exercise_weight",
            GoalKind::WorkoutCount => "workout_count",
            GoalKind::Streak => "streak",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "exercise_weight" => Some(GoalKind::ExerciseWeight),
            "workout_count" => Some(GoalKind::WorkoutCount),
            "streak" => Some(GoalKind::Streak),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub kind: GoalKind,
    pub exercise_id: Option<String>,
    pub target_value: f64,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Goal {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let kind_str: String = row.get("kind")?;
        let kind = GoalKind::parse(&kind_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                format!("unknown goal kind: {kind_str}").into(),
            )
        })?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            title: row.get("title")?,
            kind,
            exercise_id: row.get("exercise_id")?,
            target_value: row.get("target_value")?,
            deadline: row.get("deadline")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct GoalWithProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: GoalProgress,
}

#[derive(Debug, Deserialize)]
pub struct CreateGoal {
    pub title: String,
    pub kind: GoalKind,
    pub exercise_id: Option<String>,
    pub target_value: f64,
    pub deadline: Option<NaiveDate>,
}

impl CreateGoal {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Goal title is required".to_string()));
        }
        if !self.target_value.is_finite() || self.target_value <= 0.0 {
            return Err(AppError::Validation(
                "Target must be greater than zero".to_string(),
            ));
        }

        let has_exercise = self
            .exercise_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty());
        match self.kind {
            GoalKind::ExerciseWeight if !has_exercise => Err(AppError::Validation(
                "Pick an exercise for a weight goal".to_string(),
            )),
            GoalKind::WorkoutCount | GoalKind::Streak if has_exercise => Err(
                AppError::Validation("Only weight goals take an exercise".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(kind: GoalKind, exercise_id: Option<&str>, target_value: f64) -> CreateGoal {
        CreateGoal {
            title: "Get strong".to_string(),
            kind,
            exercise_id: exercise_id.map(str::to_string),
            target_value,
            deadline: None,
        }
    }

    #[test]
    fn test_goal_kind_round_trips_through_str() {
        for kind in [GoalKind::ExerciseWeight, GoalKind::WorkoutCount, GoalKind::Streak] {
            assert_eq!(GoalKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(GoalKind::parse("bogus"), None);
    }

    #[test]
    fn test_weight_goal_needs_exercise() {
        assert!(form(GoalKind::ExerciseWeight, None, 100.0).validate().is_err());
        assert!(form(GoalKind::ExerciseWeight, Some(""), 100.0).validate().is_err());
        assert!(form(GoalKind::ExerciseWeight, Some("builtin-back-squat"), 100.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_count_goal_rejects_exercise() {
        assert!(form(GoalKind::WorkoutCount, Some("builtin-back-squat"), 10.0)
            .validate()
            .is_err());
        assert!(form(GoalKind::Streak, None, 7.0).validate().is_ok());
    }

    #[test]
    fn test_target_must_be_positive() {
        assert!(form(GoalKind::Streak, None, 0.0).validate().is_err());
        assert!(form(GoalKind::Streak, None, f64::INFINITY).validate().is_err());
    }
}
