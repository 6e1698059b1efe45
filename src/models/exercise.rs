//! Exercise catalog types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Muscle group / modality an exercise belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    Chest,
    Back,
    Shoulders,
    Legs,
    Arms,
    Core,
    Cardio,
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExerciseCategory::Chest => "chest",
            ExerciseCategory::Back => "back",
            ExerciseCategory::Shoulders => "shoulders",
            ExerciseCategory::Legs => "legs",
            ExerciseCategory::Arms => "arms",
            ExerciseCategory::Core => "core",
            ExerciseCategory::Cardio => "cardio",
        };
        write!(f, "{}", name)
    }
}

/// A catalog exercise that workouts reference by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: String,
    /// Display name, e.g. "Bench Press"
    pub name: String,
    /// Muscle group or modality
    pub category: ExerciseCategory,
    /// Equipment required, e.g. "barbell"
    pub equipment: Option<String>,
    /// Muscles worked, free-form labels
    pub muscle_groups: Vec<String>,
    /// Whether the movement is a multi-joint compound lift
    #[serde(default)]
    pub is_compound: bool,
}

impl Exercise {
    /// Create a catalog entry with a generated id.
    pub fn new(name: impl Into<String>, category: ExerciseCategory) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            equipment: None,
            muscle_groups: Vec::new(),
            is_compound: false,
        }
    }

    /// Note the equipment the exercise needs.
    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment = Some(equipment.into());
        self
    }

    /// Set the muscles worked.
    pub fn with_muscle_groups(mut self, groups: Vec<String>) -> Self {
        self.muscle_groups = groups;
        self
    }

    /// Flag the movement as a compound lift.
    pub fn compound(mut self) -> Self {
        self.is_compound = true;
        self
    }
}
