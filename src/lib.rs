//! liftlog - Local-First Workout Logging Core
//!
//! Typed domain models, an SQLite-backed repository persisting the five
//! record collections (workouts, exercises, personal records, stats,
//! templates), and a pure derivation engine computing progress statistics
//! from the workout history. Stats are recomputed inside every workout
//! mutation, so reads are never stale.

pub mod models;
pub mod stats;
pub mod storage;

// Re-export commonly used types
pub use models::{
    Exercise, ExerciseCategory, ExerciseSet, PersonalRecord, UserStats, WeeklyGoal, Workout,
    WorkoutExercise, WorkoutTemplate,
};
pub use stats::engine::StatsEngine;
pub use storage::repository::{DataExport, Repository, RepositoryError};
pub use storage::store::{Collection, Store};
