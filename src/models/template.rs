//! Workout template types: reusable exercise plans a session can be
//! started from.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One planned exercise within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateExercise {
    /// Catalog id of the exercise
    pub exercise_id: String,
    /// Exercise name as planned
    pub exercise_name: String,
    /// Number of sets to perform
    pub target_sets: u32,
    /// Rep prescription, e.g. "8-12" or "10"
    pub target_reps: String,
}

impl TemplateExercise {
    pub fn new(
        exercise_id: impl Into<String>,
        exercise_name: impl Into<String>,
        target_sets: u32,
        target_reps: impl Into<String>,
    ) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            exercise_name: exercise_name.into(),
            target_sets,
            target_reps: target_reps.into(),
        }
    }
}

/// A reusable workout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    /// Unique identifier
    pub id: String,
    /// Template name, e.g. "Push Day A"
    pub name: String,
    /// What the plan is for
    pub description: String,
    /// Planned exercises, in order
    pub exercises: Vec<TemplateExercise>,
}

impl WorkoutTemplate {
    /// Create a template with a generated id.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            exercises: Vec::new(),
        }
    }

    /// Replace the planned exercise list.
    pub fn with_exercises(mut self, exercises: Vec<TemplateExercise>) -> Self {
        self.exercises = exercises;
        self
    }
}
