//! Personal record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A personal best for an exercise: the heaviest set at a given rep
/// count, achieved on a specific day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    /// Unique identifier
    pub id: String,
    /// Catalog id of the exercise
    pub exercise_id: String,
    /// Exercise name at the time the record was set
    pub exercise_name: String,
    /// Record weight
    pub weight: f64,
    /// Reps performed at that weight
    pub reps: u32,
    /// Day the record was achieved
    pub date: NaiveDate,
    /// Workout the record was set in
    pub workout_id: String,
}

impl PersonalRecord {
    /// Create a record with a generated id.
    pub fn new(
        exercise_id: impl Into<String>,
        exercise_name: impl Into<String>,
        weight: f64,
        reps: u32,
        date: NaiveDate,
        workout_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            exercise_id: exercise_id.into(),
            exercise_name: exercise_name.into(),
            weight,
            reps,
            date,
            workout_id: workout_id.into(),
        }
    }
}
