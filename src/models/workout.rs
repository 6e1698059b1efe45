//! Logged workout types: a workout is an ordered list of exercises,
//! each an ordered list of performed sets.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One performed set of an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Weight lifted (non-negative, caller's display unit)
    pub weight: f64,
    /// Repetitions performed
    pub reps: u32,
    /// Rate of Perceived Exertion, 1-10 scale
    pub rpe: Option<f64>,
    /// Whether the set was completed as planned
    #[serde(default)]
    pub completed: bool,
}

impl ExerciseSet {
    /// Create a set with the given weight and reps.
    pub fn new(weight: f64, reps: u32) -> Self {
        Self {
            weight,
            reps,
            rpe: None,
            completed: false,
        }
    }

    /// Attach an RPE rating.
    pub fn with_rpe(mut self, rpe: f64) -> Self {
        self.rpe = Some(rpe);
        self
    }

    /// Mark the set as completed.
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Training volume contributed by this set (weight x reps).
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

/// One exercise's sets within a workout. Set order is significant
/// (set 1, set 2, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Catalog id of the exercise
    pub exercise_id: String,
    /// Exercise name as displayed when logged
    pub exercise_name: String,
    /// Performed sets, in order
    pub sets: Vec<ExerciseSet>,
    /// Free-form notes for this exercise
    pub notes: Option<String>,
}

impl WorkoutExercise {
    /// Create an entry for the given exercise with no sets yet.
    pub fn new(exercise_id: impl Into<String>, exercise_name: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            exercise_name: exercise_name.into(),
            sets: Vec::new(),
            notes: None,
        }
    }

    /// Replace the set list.
    pub fn with_sets(mut self, sets: Vec<ExerciseSet>) -> Self {
        self.sets = sets;
        self
    }

    /// Heaviest single-set weight, 0 when no sets are logged.
    pub fn max_set_weight(&self) -> f64 {
        self.sets.iter().fold(0.0, |best, set| best.max(set.weight))
    }

    /// Total volume across this exercise's sets.
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(ExerciseSet::volume).sum()
    }
}

/// A logged workout session. Identity is the `id` field; saving a
/// workout with an existing id replaces the stored one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: String,
    /// Workout name (non-empty)
    pub name: String,
    /// Calendar day the workout took place
    pub date: NaiveDate,
    /// Exercises performed, in order
    pub exercises: Vec<WorkoutExercise>,
    /// Session length in minutes, when tracked
    pub duration_minutes: Option<u32>,
    /// Free-form session notes
    pub notes: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Create a new workout with a generated id.
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            date,
            exercises: Vec::new(),
            duration_minutes: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Replace the exercise list.
    pub fn with_exercises(mut self, exercises: Vec<WorkoutExercise>) -> Self {
        self.exercises = exercises;
        self
    }

    /// Set the session duration in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Attach session notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Total training volume (weight x reps over every set).
    pub fn volume(&self) -> f64 {
        self.exercises.iter().map(WorkoutExercise::volume).sum()
    }

    /// Heaviest single-set weight in the session, 0 when none.
    pub fn best_set_weight(&self) -> f64 {
        self.exercises
            .iter()
            .fold(0.0, |best, e| best.max(e.max_set_weight()))
    }

    /// Number of sets logged across all exercises.
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}
