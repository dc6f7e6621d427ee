use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use super::{today, DEFAULT_WINDOW_DAYS};
use crate::analytics::streak::calculate_streak;
use crate::analytics::volume::muscle_heatmap;
use crate::analytics::DateWindow;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::repositories::{GoalRepository, WorkoutRepository};
use crate::suggestions::{
    build_prompt, RecentExercise, RecentWorkout, SuggestionClient, SuggestionContext,
};

const RECENT_WORKOUTS: i64 = 5;

#[derive(Clone)]
pub struct SuggestionsState {
    pub workout_repo: WorkoutRepository,
    pub goal_repo: GoalRepository,
    pub client: Option<SuggestionClient>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionRequest {
    pub focus: Option<String>,
}

#[derive(Serialize)]
pub struct SuggestionResponse {
    suggestion: String,
}

pub async fn suggest(
    State(state): State<SuggestionsState>,
    auth_user: AuthUser,
    WithRejection(Json(form), _): WithRejection<Json<SuggestionRequest>, AppError>,
) -> Result<Json<SuggestionResponse>> {
    let client = state.client.as_ref().ok_or_else(|| {
        AppError::Unavailable("Workout suggestions are not configured".to_string())
    })?;

    let today = today();
    let window = DateWindow::trailing(today, DEFAULT_WINDOW_DAYS);

    let dates = state.workout_repo.find_workout_dates(&auth_user.id).await?;
    let rows = state
        .workout_repo
        .find_volume_rows(&auth_user.id, Some(window.start))
        .await?;

    let logs = state
        .workout_repo
        .find_logs_by_user_paginated(&auth_user.id, RECENT_WORKOUTS, 0)
        .await?;
    let mut recent_workouts = Vec::with_capacity(logs.len());
    for log in logs {
        let entries = state.workout_repo.find_entries_by_log(&log.id).await?;
        recent_workouts.push(RecentWorkout {
            performed_on: log.performed_on,
            exercises: entries
                .into_iter()
                .map(|e| RecentExercise {
                    name: e.exercise_name,
                    sets: e.sets,
                    reps: e.reps,
                    weight: e.weight,
                })
                .collect(),
        });
    }

    let goals = state
        .goal_repo
        .find_by_user(&auth_user.id)
        .await?
        .into_iter()
        .map(|g| g.title)
        .collect();

    let ctx = SuggestionContext {
        today,
        streak: calculate_streak(&dates, today),
        recent_workouts,
        heatmap: muscle_heatmap(&rows, window),
        goals,
        focus: form.focus,
    };

    let suggestion = client.suggest(&build_prompt(&ctx)).await?;
    tracing::info!(user_id = %auth_user.id, "Generated workout suggestion");

    Ok(Json(SuggestionResponse { suggestion }))
}
