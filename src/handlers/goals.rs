use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use super::today;
use crate::analytics::goals::progress;
use crate::analytics::records::best_lifts;
use crate::analytics::streak::calculate_streak;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{CreateGoal, Goal, GoalKind, GoalWithProgress};
use crate::repositories::{ExerciseRepository, GoalRepository, WorkoutRepository};

#[derive(Clone)]
pub struct GoalsState {
    pub goal_repo: GoalRepository,
    pub workout_repo: WorkoutRepository,
    pub exercise_repo: ExerciseRepository,
}

/// The user's current value for whatever the goal measures.
pub async fn current_value(
    workout_repo: &WorkoutRepository,
    user_id: &str,
    goal: &Goal,
) -> Result<f64> {
    match goal.kind {
        GoalKind::ExerciseWeight => {
            let lifts = workout_repo
                .find_lift_history(user_id, goal.exercise_id.as_deref())
                .await?;
            Ok(best_lifts(&lifts).first().map_or(0.0, |b| b.weight))
        }
        GoalKind::WorkoutCount => {
            let since = goal.created_at.with_timezone(&chrono::Local).date_naive();
            let count = workout_repo.count_logs_since(user_id, Some(since)).await?;
            Ok(count as f64)
        }
        GoalKind::Streak => {
            let dates = workout_repo.find_workout_dates(user_id).await?;
            Ok(calculate_streak(&dates, today()).current as f64)
        }
    }
}

pub async fn list(
    State(state): State<GoalsState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<GoalWithProgress>>> {
    let goals = state.goal_repo.find_by_user(&auth_user.id).await?;

    let mut result = Vec::with_capacity(goals.len());
    for goal in goals {
        let current = current_value(&state.workout_repo, &auth_user.id, &goal).await?;
        result.push(GoalWithProgress {
            progress: progress(current, goal.target_value),
            goal,
        });
    }

    Ok(Json(result))
}

pub async fn create(
    State(state): State<GoalsState>,
    auth_user: AuthUser,
    WithRejection(Json(form), _): WithRejection<Json<CreateGoal>, AppError>,
) -> Result<(StatusCode, Json<GoalWithProgress>)> {
    form.validate()?;

    if let Some(exercise_id) = form.exercise_id.as_deref() {
        let visible = state
            .exercise_repo
            .find_by_id(exercise_id)
            .await?
            .is_some_and(|e| e.is_visible_to(&auth_user.id));
        if !visible {
            return Err(AppError::Validation("Unknown exercise".to_string()));
        }
    }

    let goal = state.goal_repo.create(&auth_user.id, &form).await?;
    tracing::info!(user_id = %auth_user.id, kind = goal.kind.as_str(), "Created goal");

    let current = current_value(&state.workout_repo, &auth_user.id, &goal).await?;
    Ok((
        StatusCode::CREATED,
        Json(GoalWithProgress {
            progress: progress(current, goal.target_value),
            goal,
        }),
    ))
}

pub async fn delete(
    State(state): State<GoalsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.goal_repo.delete(&id, &auth_user.id).await? {
        return Err(AppError::NotFound("Goal not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
