use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ironlog::config::Config;
use ironlog::handlers::{
    dashboard, exercises, goals, health, routines, social, stats, suggestions, workouts,
};
use ironlog::repositories::{
    ExerciseRepository, GoalRepository, RoutineRepository, SessionRepository, SocialRepository,
    UserRepository, WorkoutRepository,
};
use ironlog::routes::{self, AppStates};
use ironlog::suggestions::SuggestionClient;
use ironlog::version::GIT_VERSION;
use ironlog::{db, migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ironlog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing::info!("Starting ironlog {}", GIT_VERSION);
    tracing::info!("Connecting to database: {}", config.database_url);

    let pool = db::create_pool(&config.database_url)?;
    migrations::run_migrations(&pool)?;

    // Create repositories
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());
    let routine_repo = RoutineRepository::new(pool.clone());
    let goal_repo = GoalRepository::new(pool.clone());
    let social_repo = SocialRepository::new(pool.clone());

    let removed = session_repo.cleanup_expired().await?;
    if removed > 0 {
        tracing::info!("Removed {} expired sessions", removed);
    }

    let client = match config.llm.clone() {
        Some(llm) => {
            tracing::info!("Workout suggestions enabled with model {}", llm.model);
            Some(SuggestionClient::new(llm)?)
        }
        None => {
            tracing::info!("LLM_ENDPOINT not set, workout suggestions disabled");
            None
        }
    };

    // Create handler states
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
        suggestions: suggestions::SuggestionsState {
            workout_repo,
            goal_repo,
            client,
        },
    };

    let app = routes::create_router(states, session_repo);

    // Start server
    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
