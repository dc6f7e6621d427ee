use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::routine::group_into_blocks;
use crate::models::{
    AddRoutineExercise, CreateRoutine, ReorderRoutineExercise, Routine, RoutineDetail,
};
use crate::repositories::{ExerciseRepository, RoutineRepository};

#[derive(Clone)]
pub struct RoutinesState {
    pub routine_repo: RoutineRepository,
    pub exercise_repo: ExerciseRepository,
}

async fn find_own_routine(state: &RoutinesState, id: &str, user_id: &str) -> Result<Routine> {
    state
        .routine_repo
        .find_by_id(id)
        .await?
        .filter(|r| r.user_id == user_id)
        .ok_or_else(|| AppError::NotFound("Routine not found".to_string()))
}

async fn load_detail(state: &RoutinesState, routine: Routine) -> Result<RoutineDetail> {
    let exercises = state.routine_repo.find_exercises(&routine.id).await?;
    Ok(RoutineDetail {
        routine,
        blocks: group_into_blocks(exercises),
    })
}

pub async fn list(
    State(state): State<RoutinesState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Routine>>> {
    let routines = state.routine_repo.find_by_user(&auth_user.id).await?;
    Ok(Json(routines))
}

pub async fn create(
    State(state): State<RoutinesState>,
    auth_user: AuthUser,
    WithRejection(Json(form), _): WithRejection<Json<CreateRoutine>, AppError>,
) -> Result<(StatusCode, Json<Routine>)> {
    if form.name.trim().is_empty() {
        return Err(AppError::Validation("Routine name is required".to_string()));
    }

    let routine = state.routine_repo.create(&auth_user.id, &form).await?;
    tracing::info!(user_id = %auth_user.id, "Created routine {}", routine.name);

    Ok((StatusCode::CREATED, Json(routine)))
}

pub async fn show(
    State(state): State<RoutinesState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<RoutineDetail>> {
    let routine = find_own_routine(&state, &id, &auth_user.id).await?;
    Ok(Json(load_detail(&state, routine).await?))
}

pub async fn delete(
    State(state): State<RoutinesState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.routine_repo.delete(&id, &auth_user.id).await? {
        return Err(AppError::NotFound("Routine not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_exercise(
    State(state): State<RoutinesState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    WithRejection(Json(form), _): WithRejection<Json<AddRoutineExercise>, AppError>,
) -> Result<(StatusCode, Json<RoutineDetail>)> {
    let routine = find_own_routine(&state, &id, &auth_user.id).await?;

    if form.sets < 1 || form.reps < 1 {
        return Err(AppError::Validation(
            "Sets and reps must be at least 1".to_string(),
        ));
    }
    if form.weight.is_some_and(|w| !w.is_finite() || w < 0.0) {
        return Err(AppError::Validation("Weight cannot be negative".to_string()));
    }

    let visible = state
        .exercise_repo
        .find_by_id(&form.exercise_id)
        .await?
        .is_some_and(|e| e.is_visible_to(&auth_user.id));
    if !visible {
        return Err(AppError::Validation("Unknown exercise".to_string()));
    }

    state.routine_repo.add_exercise(&routine.id, &form).await?;

    Ok((StatusCode::CREATED, Json(load_detail(&state, routine).await?)))
}

pub async fn reorder(
    State(state): State<RoutinesState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    WithRejection(Json(form), _): WithRejection<Json<ReorderRoutineExercise>, AppError>,
) -> Result<Json<RoutineDetail>> {
    let routine = find_own_routine(&state, &id, &auth_user.id).await?;

    if !state
        .routine_repo
        .reorder(&routine.id, form.from, form.to)
        .await?
    {
        return Err(AppError::Validation("Position out of range".to_string()));
    }

    Ok(Json(load_detail(&state, routine).await?))
}
