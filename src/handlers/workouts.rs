use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use super::today;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{CreateWorkoutLog, CreatedWorkoutLog, WorkoutLog, WorkoutLogDetail};
use crate::repositories::{ExerciseRepository, RoutineRepository, WorkoutRepository};

const PER_PAGE: i64 = 10;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
    pub exercise_repo: ExerciseRepository,
    pub routine_repo: RoutineRepository,
}

#[derive(Deserialize)]
pub struct ListQuery {
    page: Option<i64>,
}

#[derive(Serialize)]
pub struct WorkoutsPage {
    workouts: Vec<WorkoutLog>,
    page: i64,
    total_pages: i64,
    total: i64,
}

async fn find_own_log(state: &WorkoutsState, id: &str, user_id: &str) -> Result<WorkoutLog> {
    state
        .workout_repo
        .find_log_by_id(id)
        .await?
        .filter(|log| log.user_id == user_id)
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))
}

pub async fn list(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    WithRejection(Query(query), _): WithRejection<Query<ListQuery>, AppError>,
) -> Result<Json<WorkoutsPage>> {
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1)
        .checked_mul(PER_PAGE)
        .ok_or_else(|| AppError::Validation("Page out of range".to_string()))?;

    let workouts = state
        .workout_repo
        .find_logs_by_user_paginated(&auth_user.id, PER_PAGE, offset)
        .await?;
    let total = state.workout_repo.count_logs_by_user(&auth_user.id).await?;
    let total_pages = (total + PER_PAGE - 1) / PER_PAGE;

    Ok(Json(WorkoutsPage {
        workouts,
        page,
        total_pages,
        total,
    }))
}

pub async fn create(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    WithRejection(Json(form), _): WithRejection<Json<CreateWorkoutLog>, AppError>,
) -> Result<(StatusCode, Json<CreatedWorkoutLog>)> {
    form.validate()?;

    let today = today();
    let performed_on = form.performed_on.unwrap_or(today);
    if performed_on > today {
        return Err(AppError::Validation(
            "Workout date cannot be in the future".to_string(),
        ));
    }

    for entry in &form.entries {
        let visible = state
            .exercise_repo
            .find_by_id(&entry.exercise_id)
            .await?
            .is_some_and(|e| e.is_visible_to(&auth_user.id));
        if !visible {
            return Err(AppError::Validation("Unknown exercise".to_string()));
        }
    }

    if let Some(routine_id) = form.routine_id.as_deref().filter(|r| !r.trim().is_empty()) {
        let owned = state
            .routine_repo
            .find_by_id(routine_id)
            .await?
            .is_some_and(|r| r.user_id == auth_user.id);
        if !owned {
            return Err(AppError::Validation("Unknown routine".to_string()));
        }
    }

    let (log, personal_records) = state
        .workout_repo
        .create_log(&auth_user.id, performed_on, form)
        .await?;

    if !personal_records.is_empty() {
        tracing::info!(
            user_id = %auth_user.id,
            workout_id = %log.id,
            "New personal records: {}",
            personal_records.len()
        );
    }

    let entries = state.workout_repo.find_entries_by_log(&log.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedWorkoutLog {
            detail: WorkoutLogDetail::new(log, entries),
            personal_records,
        }),
    ))
}

pub async fn show(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<WorkoutLogDetail>> {
    let log = find_own_log(&state, &id, &auth_user.id).await?;
    let entries = state.workout_repo.find_entries_by_log(&log.id).await?;

    Ok(Json(WorkoutLogDetail::new(log, entries)))
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.workout_repo.delete_log(&id, &auth_user.id).await? {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
