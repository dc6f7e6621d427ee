use axum::{extract::State, Json};
use serde::Serialize;

use super::today;
use crate::analytics::streak::calculate_streak;
use crate::analytics::volume::total_volume;
use crate::analytics::{DateWindow, StreakSummary};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::WorkoutLog;
use crate::repositories::WorkoutRepository;

#[derive(Clone)]
pub struct DashboardState {
    pub workout_repo: WorkoutRepository,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    username: String,
    streak: StreakSummary,
    workouts_this_week: i64,
    workouts_this_month: i64,
    volume_this_week: f64,
    recent_workouts: Vec<WorkoutLog>,
}

pub async fn index(
    State(state): State<DashboardState>,
    auth_user: AuthUser,
) -> Result<Json<DashboardResponse>> {
    let today = today();
    let week = DateWindow::trailing(today, 7);
    let month = DateWindow::trailing(today, 30);

    let dates = state.workout_repo.find_workout_dates(&auth_user.id).await?;
    let workouts_this_week = state
        .workout_repo
        .count_logs_since(&auth_user.id, Some(week.start))
        .await?;
    let workouts_this_month = state
        .workout_repo
        .count_logs_since(&auth_user.id, Some(month.start))
        .await?;
    let week_rows = state
        .workout_repo
        .find_volume_rows(&auth_user.id, Some(week.start))
        .await?;
    let recent_workouts = state
        .workout_repo
        .find_logs_by_user_paginated(&auth_user.id, 5, 0)
        .await?;

    Ok(Json(DashboardResponse {
        username: auth_user.username,
        streak: calculate_streak(&dates, today),
        workouts_this_week,
        workouts_this_month,
        volume_this_week: total_volume(&week_rows),
        recent_workouts,
    }))
}
