#![allow(dead_code)]

use axum::{body::Body, Router};
use chrono::NaiveDate;
use http::{header, Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

use ironlog::db::{create_memory_pool, DbPool};
use ironlog::handlers::{
    dashboard, exercises, goals, health, routines, social, stats, suggestions, workouts,
};
use ironlog::migrations::run_migrations_for_tests;
use ironlog::models::{CreateWorkoutLog, CreateWorkoutLogEntry, User, WorkoutLog};
use ironlog::repositories::{
    ExerciseRepository, GoalRepository, RoutineRepository, SessionRepository, SocialRepository,
    UserRepository, WorkoutRepository,
};
use ironlog::routes::{create_router, AppStates};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());
    let routine_repo = RoutineRepository::new(pool.clone());
    let goal_repo = GoalRepository::new(pool.clone());
    let social_repo = SocialRepository::new(pool.clone());

    let states = AppStates {
        health: health::HealthState { pool: pool.clone() },
        dashboard: dashboard::DashboardState {
            workout_repo: workout_repo.clone(),
        },
        exercises: exercises::ExercisesState {
            exercise_repo: exercise_repo.clone(),
        },
        workouts: workouts::WorkoutsState {
            workout_repo: workout_repo.clone(),
            exercise_repo: exercise_repo.clone(),
            routine_repo: routine_repo.clone(),
        },
        stats: stats::StatsState {
            workout_repo: workout_repo.clone(),
            exercise_repo: exercise_repo.clone(),
        },
        routines: routines::RoutinesState {
            routine_repo,
            exercise_repo: exercise_repo.clone(),
        },
        goals: goals::GoalsState {
            goal_repo: goal_repo.clone(),
            workout_repo: workout_repo.clone(),
            exercise_repo,
        },
        social: social::SocialState {
            social_repo,
            user_repo,
            workout_repo: workout_repo.clone(),
        },
        // No LLM endpoint in tests
        suggestions: suggestions::SuggestionsState {
            workout_repo,
            goal_repo,
            client: None,
        },
    };

    create_router(states, session_repo)
}

pub async fn create_test_user(pool: &DbPool, username: &str) -> User {
    let user_repo = UserRepository::new(pool.clone());
    user_repo.create(username, None).await.unwrap()
}

pub async fn create_session_token(pool: &DbPool, user: &User) -> String {
    let session_repo = SessionRepository::new(pool.clone());
    session_repo.create(&user.id).await.unwrap()
}

pub async fn create_session_cookie(pool: &DbPool, user: &User) -> String {
    format!("session={}", create_session_token(pool, user).await)
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn days_ago(days: i64) -> NaiveDate {
    today() - chrono::Duration::days(days)
}

/// Log a single-exercise workout straight through the repository.
pub async fn create_test_workout(
    pool: &DbPool,
    user_id: &str,
    performed_on: NaiveDate,
    exercise_id: &str,
    sets: i32,
    reps: i32,
    weight: f64,
) -> WorkoutLog {
    let workout_repo = WorkoutRepository::new(pool.clone());
    let form = CreateWorkoutLog {
        performed_on: Some(performed_on),
        routine_id: None,
        duration_minutes: None,
        notes: None,
        entries: vec![CreateWorkoutLogEntry {
            exercise_id: exercise_id.to_string(),
            sets,
            reps,
            weight,
        }],
    };
    let (log, _) = workout_repo
        .create_log(user_id, performed_on, form)
        .await
        .unwrap();
    log
}

pub fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, cookie: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn get_json(app: &Router, uri: &str, cookie: &str) -> serde_json::Value {
    body_json(send(app, get(uri, cookie)).await).await
}
