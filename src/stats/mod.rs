//! Derived statistics: the recompute engine and progress aggregations.

pub mod engine;
pub mod progress;

pub use engine::{ExerciseProgress, StatsEngine};
pub use progress::{
    exercise_usage, monthly_volume, recent_records, recent_workouts, records_this_month,
    ExerciseUsage, MonthlyVolume,
};
