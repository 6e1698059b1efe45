//! Domain model types shared across storage and stats.

pub mod exercise;
pub mod record;
pub mod stats;
pub mod template;
pub mod workout;

pub use exercise::{Exercise, ExerciseCategory};
pub use record::PersonalRecord;
pub use stats::{UserStats, WeeklyGoal, DEFAULT_WEEKLY_TARGET};
pub use template::{TemplateExercise, WorkoutTemplate};
pub use workout::{ExerciseSet, Workout, WorkoutExercise};
