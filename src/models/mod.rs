pub mod exercise;
pub mod from_row;
pub mod goal;
pub mod routine;
pub mod user;
pub mod workout_log;

pub use exercise::{CreateExercise, Exercise, MuscleGroup, MUSCLE_GROUPS};
pub use from_row::{query_all, query_optional, FromSqliteRow};
pub use goal::{CreateGoal, Goal, GoalKind, GoalWithProgress};
pub use routine::{
    AddRoutineExercise, CreateRoutine, ReorderRoutineExercise, Routine, RoutineBlock,
    RoutineDetail, RoutineExercise,
};
pub use user::User;
pub use workout_log::{
    CreateWorkoutLog, CreateWorkoutLogEntry, CreatedWorkoutLog, ExerciseHistoryEntry, WorkoutLog,
    WorkoutLogDetail, WorkoutLogEntry,
};
