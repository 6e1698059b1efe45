//! Read-only aggregations for progress and history views.

use crate::models::{PersonalRecord, Workout};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Training volume for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    /// Calendar year
    pub year: i32,
    /// Month, 1-12
    pub month: u32,
    /// Total weight x reps lifted that month
    pub volume: f64,
}

/// Summary of one exercise's appearances in the history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseUsage {
    /// Heaviest single-set weight logged for the exercise
    pub best_weight: f64,
    /// Number of workouts containing the exercise
    pub session_count: u32,
}

/// Total volume per calendar month, chronological.
///
/// Months are keyed by year and month together, so June of different
/// years never collapses into one bucket.
pub fn monthly_volume(workouts: &[Workout]) -> Vec<MonthlyVolume> {
    let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();

    for workout in workouts {
        let key = (workout.date.year(), workout.date.month());
        *buckets.entry(key).or_insert(0.0) += workout.volume();
    }

    buckets
        .into_iter()
        .map(|((year, month), volume)| MonthlyVolume {
            year,
            month,
            volume,
        })
        .collect()
}

/// The `n` most recent workouts, newest first.
///
/// Ties on the calendar day are broken by creation time, so two sessions
/// logged the same day keep a stable newest-first order.
pub fn recent_workouts(workouts: &[Workout], n: usize) -> Vec<&Workout> {
    let mut sorted: Vec<&Workout> = workouts.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    sorted.truncate(n);
    sorted
}

/// The `n` most recent personal records, newest first.
pub fn recent_records(records: &[PersonalRecord], n: usize) -> Vec<&PersonalRecord> {
    let mut sorted: Vec<&PersonalRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

/// Personal records set in today's calendar month.
pub fn records_this_month(records: &[PersonalRecord], today: NaiveDate) -> u32 {
    records
        .iter()
        .filter(|r| r.date.year() == today.year() && r.date.month() == today.month())
        .count() as u32
}

/// Best weight and session count for one catalog exercise.
pub fn exercise_usage(workouts: &[Workout], exercise_id: &str) -> ExerciseUsage {
    let mut best_weight: f64 = 0.0;
    let mut session_count: u32 = 0;

    for workout in workouts {
        let mut in_session = false;
        for exercise in &workout.exercises {
            if exercise.exercise_id == exercise_id {
                in_session = true;
                best_weight = best_weight.max(exercise.max_set_weight());
            }
        }
        if in_session {
            session_count += 1;
        }
    }

    ExerciseUsage {
        best_weight,
        session_count,
    }
}
