use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::exercise::is_known_muscle_group;
use crate::models::{CreateExercise, Exercise, MuscleGroup, MUSCLE_GROUPS};
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

#[derive(Serialize)]
pub struct ExercisesResponse {
    exercises: Vec<Exercise>,
    muscle_groups: &'static [MuscleGroup],
}

pub async fn list(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
) -> Result<Json<ExercisesResponse>> {
    let exercises = state
        .exercise_repo
        .find_available_for_user(&auth_user.id)
        .await?;

    Ok(Json(ExercisesResponse {
        exercises,
        muscle_groups: MUSCLE_GROUPS,
    }))
}

pub async fn create(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    WithRejection(Json(form), _): WithRejection<Json<CreateExercise>, AppError>,
) -> Result<(StatusCode, Json<Exercise>)> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Exercise name is required".to_string()));
    }
    if !is_known_muscle_group(&form.muscle_group) {
        return Err(AppError::Validation("Unknown muscle group".to_string()));
    }
    if state.exercise_repo.name_taken(&auth_user.id, name).await? {
        return Err(AppError::Validation(
            "An exercise with this name already exists".to_string(),
        ));
    }

    let exercise = state.exercise_repo.create(&auth_user.id, &form).await?;
    tracing::info!(user_id = %auth_user.id, "Created exercise {}", exercise.name);

    Ok((StatusCode::CREATED, Json(exercise)))
}
