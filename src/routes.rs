use axum::{
    routing::{delete, get, post},
    Extension, Router,
};

use crate::handlers::{
    dashboard, exercises, goals, health, routines, social, stats, suggestions, workouts,
};
use crate::repositories::SessionRepository;

pub struct AppStates {
    pub health: health::HealthState,
    pub dashboard: dashboard::DashboardState,
    pub exercises: exercises::ExercisesState,
    pub workouts: workouts::WorkoutsState,
    pub stats: stats::StatsState,
    pub routines: routines::RoutinesState,
    pub goals: goals::GoalsState,
    pub social: social::SocialState,
    pub suggestions: suggestions::SuggestionsState,
}

pub fn create_router(states: AppStates, session_repo: SessionRepository) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        .with_state(states.health)
        // Dashboard
        .route("/api/dashboard", get(dashboard::index))
        .with_state(states.dashboard)
        // Exercise routes
        .route(
            "/api/exercises",
            get(exercises::list).post(exercises::create),
        )
        .with_state(states.exercises)
        // Workout routes
        .route("/api/workouts", get(workouts::list).post(workouts::create))
        .route(
            "/api/workouts/{id}",
            get(workouts::show).delete(workouts::delete),
        )
        .with_state(states.workouts)
        // Stats routes
        .route("/api/stats/streak", get(stats::streak))
        .route("/api/stats/volume", get(stats::volume))
        .route("/api/stats/heatmap", get(stats::heatmap))
        .route("/api/stats/prs", get(stats::prs_list))
        .route("/api/stats/exercises/{id}", get(stats::exercise_stats))
        .with_state(states.stats)
        // Routine routes
        .route("/api/routines", get(routines::list).post(routines::create))
        .route(
            "/api/routines/{id}",
            get(routines::show).delete(routines::delete),
        )
        .route("/api/routines/{id}/exercises", post(routines::add_exercise))
        .route("/api/routines/{id}/reorder", post(routines::reorder))
        .with_state(states.routines)
        // Goal routes
        .route("/api/goals", get(goals::list).post(goals::create))
        .route("/api/goals/{id}", delete(goals::delete))
        .with_state(states.goals)
        // Social routes
        .route(
            "/api/users/{id}/follow",
            post(social::follow).delete(social::unfollow),
        )
        .route("/api/leaderboard", get(social::leaderboard))
        .with_state(states.social)
        // Suggestions
        .route("/api/suggestions", post(suggestions::suggest))
        .with_state(states.suggestions)
        // Session lookup via Extension layer
        .layer(Extension(session_repo))
}
