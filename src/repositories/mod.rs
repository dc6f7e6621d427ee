pub mod exercise_repo;
pub mod goal_repo;
pub mod routine_repo;
pub mod session_repo;
pub mod social_repo;
pub mod user_repo;
pub mod workout_repo;

pub use exercise_repo::ExerciseRepository;
pub use goal_repo::GoalRepository;
pub use routine_repo::RoutineRepository;
pub use session_repo::SessionRepository;
pub use social_repo::SocialRepository;
pub use user_repo::UserRepository;
pub use workout_repo::WorkoutRepository;
