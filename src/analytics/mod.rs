//! Pure aggregations over rows already loaded from the database.
//!
//! Nothing in here touches storage or the clock: callers pass `today` in.

pub mod goals;
pub mod leaderboard;
pub mod records;
pub mod streak;
pub mod volume;

pub use goals::GoalProgress;
pub use leaderboard::{LeaderboardEntry, LeaderboardMetric, LeaderboardPeriod, Standing};
pub use records::{BestLift, LiftSample, PersonalRecordHit};
pub use streak::StreakSummary;
pub use volume::{DailyVolume, DateWindow, MuscleGroupLoad, VolumeRow};
