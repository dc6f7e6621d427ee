use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;

use super::{today, WindowQuery};
use crate::analytics::records::best_lifts;
use crate::analytics::streak::calculate_streak;
use crate::analytics::volume::{daily_volume, muscle_heatmap};
use crate::analytics::{BestLift, DailyVolume, DateWindow, MuscleGroupLoad, StreakSummary};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Exercise, ExerciseHistoryEntry};
use crate::repositories::{ExerciseRepository, WorkoutRepository};

#[derive(Clone)]
pub struct StatsState {
    pub workout_repo: WorkoutRepository,
    pub exercise_repo: ExerciseRepository,
}

#[derive(Serialize)]
pub struct VolumeResponse {
    window: DateWindow,
    total: f64,
    days: Vec<DailyVolume>,
}

#[derive(Serialize)]
pub struct HeatmapResponse {
    window: DateWindow,
    muscle_groups: Vec<MuscleGroupLoad>,
}

#[derive(Serialize)]
pub struct PersonalRecordView {
    exercise_id: String,
    exercise_name: String,
    weight: f64,
    workout_log_id: String,
}

#[derive(Serialize)]
pub struct ExerciseStatsResponse {
    exercise: Exercise,
    best: Option<BestLift>,
    history: Vec<ExerciseHistoryEntry>,
}

pub async fn streak(
    State(state): State<StatsState>,
    auth_user: AuthUser,
) -> Result<Json<StreakSummary>> {
    let dates = state.workout_repo.find_workout_dates(&auth_user.id).await?;
    Ok(Json(calculate_streak(&dates, today())))
}

pub async fn volume(
    State(state): State<StatsState>,
    auth_user: AuthUser,
    WithRejection(Query(query), _): WithRejection<Query<WindowQuery>, AppError>,
) -> Result<Json<VolumeResponse>> {
    let window = DateWindow::trailing(today(), query.days()?);
    let rows = state
        .workout_repo
        .find_volume_rows(&auth_user.id, Some(window.start))
        .await?;

    let days = daily_volume(&rows, window);
    Ok(Json(VolumeResponse {
        window,
        total: days.iter().map(|d| d.volume).sum(),
        days,
    }))
}

pub async fn heatmap(
    State(state): State<StatsState>,
    auth_user: AuthUser,
    WithRejection(Query(query), _): WithRejection<Query<WindowQuery>, AppError>,
) -> Result<Json<HeatmapResponse>> {
    let window = DateWindow::trailing(today(), query.days()?);
    let rows = state
        .workout_repo
        .find_volume_rows(&auth_user.id, Some(window.start))
        .await?;

    Ok(Json(HeatmapResponse {
        window,
        muscle_groups: muscle_heatmap(&rows, window),
    }))
}

pub async fn prs_list(
    State(state): State<StatsState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<PersonalRecordView>>> {
    let history = state
        .workout_repo
        .find_lift_history(&auth_user.id, None)
        .await?;
    let names: HashMap<String, String> = state
        .exercise_repo
        .find_available_for_user(&auth_user.id)
        .await?
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();

    let mut records: Vec<PersonalRecordView> = best_lifts(&history)
        .into_iter()
        .map(|lift| PersonalRecordView {
            exercise_name: names
                .get(&lift.exercise_id)
                .cloned()
                .unwrap_or_else(|| lift.exercise_id.clone()),
            exercise_id: lift.exercise_id,
            weight: lift.weight,
            workout_log_id: lift.workout_log_id,
        })
        .collect();
    records.sort_by(|a, b| a.exercise_name.cmp(&b.exercise_name));

    Ok(Json(records))
}

pub async fn exercise_stats(
    State(state): State<StatsState>,
    auth_user: AuthUser,
    Path(exercise_id): Path<String>,
) -> Result<Json<ExerciseStatsResponse>> {
    let exercise = state
        .exercise_repo
        .find_by_id(&exercise_id)
        .await?
        .filter(|e| e.is_visible_to(&auth_user.id))
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;

    let history = state
        .workout_repo
        .find_exercise_history(&auth_user.id, &exercise_id, 50)
        .await?;
    let lifts = state
        .workout_repo
        .find_lift_history(&auth_user.id, Some(&exercise_id))
        .await?;

    Ok(Json(ExerciseStatsResponse {
        exercise,
        best: best_lifts(&lifts).into_iter().next(),
        history,
    }))
}
