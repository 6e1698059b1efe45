//! Stats derivation over the workout history.
//!
//! Everything here is pure: the caller supplies the workout collection and
//! "today", the engine returns values. Streak counting walks distinct
//! training days newest-first and allows one unlogged day (so an existing
//! streak survives until tomorrow if today's session just hasn't been
//! logged yet). Week-scoped counts use an explicit week-start day rather
//! than whatever the platform locale says.

use crate::models::stats::DEFAULT_WEEKLY_TARGET;
use crate::models::{UserStats, WeeklyGoal, Workout};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How many of the most recent / oldest sessions the strength-gain
/// comparison averages over.
const STRENGTH_GAIN_WINDOW: usize = 10;

/// Days in the consistency window.
const CONSISTENCY_WINDOW_DAYS: i64 = 30;

/// Max-weight trend for one exercise across the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseProgress {
    /// Exercise name as logged
    pub exercise_name: String,
    /// Change from first to latest occurrence, percent, rounded
    pub progress_percent: i32,
}

/// Derivation engine for user statistics.
pub struct StatsEngine {
    /// First day of the training week.
    week_start: Weekday,
}

impl StatsEngine {
    /// Create an engine with the default Sunday week start.
    pub fn new() -> Self {
        Self {
            week_start: Weekday::Sun,
        }
    }

    /// Create an engine with a custom week start.
    pub fn with_week_start(week_start: Weekday) -> Self {
        Self { week_start }
    }

    /// The configured first day of the week.
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Recompute user stats from the full workout collection.
    ///
    /// Every field is derived from `workouts` except `weekly_goal.target`,
    /// which is carried over from `previous` (or defaults to 3).
    pub fn recompute(
        &self,
        workouts: &[Workout],
        previous: Option<&UserStats>,
        today: NaiveDate,
    ) -> UserStats {
        let this_week = self.count_this_week(workouts, today);
        let target = previous
            .map(|stats| stats.weekly_goal.target)
            .unwrap_or(DEFAULT_WEEKLY_TARGET);

        UserStats {
            total_workouts: workouts.len() as u32,
            current_streak: self.current_streak(workouts, today),
            weekly_goal: WeeklyGoal {
                current: this_week,
                target,
            },
            this_week,
            total_weight: self.total_weight(workouts),
            best_set: self.best_set(workouts),
            avg_duration: self.avg_duration(workouts),
        }
    }

    /// Consecutive training days ending at today or yesterday.
    ///
    /// Distinct workout dates are walked newest-first; a day at offset `d`
    /// from today extends the streak while `d == streak` or
    /// `d == streak + 1`. The first non-qualifying day (including any
    /// future-dated workout) stops the walk.
    pub fn current_streak(&self, workouts: &[Workout], today: NaiveDate) -> u32 {
        let mut days: Vec<NaiveDate> = workouts.iter().map(|w| w.date).collect();
        days.sort_unstable();
        days.dedup();
        days.reverse();

        let mut streak: u32 = 0;
        for day in days {
            let offset = (today - day).num_days();
            if offset == i64::from(streak) || offset == i64::from(streak) + 1 {
                streak += 1;
            } else {
                break;
            }
        }

        streak
    }

    /// Most recent occurrence of the week-start day, on or before `today`.
    pub fn week_start_of(&self, today: NaiveDate) -> NaiveDate {
        let days_back = (today.weekday().num_days_from_sunday() + 7
            - self.week_start.num_days_from_sunday())
            % 7;
        today - Duration::days(i64::from(days_back))
    }

    /// Workouts dated inside the current week.
    fn count_this_week(&self, workouts: &[Workout], today: NaiveDate) -> u32 {
        let start = self.week_start_of(today);
        let end = start + Duration::days(7);
        workouts
            .iter()
            .filter(|w| w.date >= start && w.date < end)
            .count() as u32
    }

    /// Lifetime volume: weight x reps summed over every set.
    fn total_weight(&self, workouts: &[Workout]) -> f64 {
        workouts.iter().map(Workout::volume).sum()
    }

    /// Heaviest single-set weight across the history.
    fn best_set(&self, workouts: &[Workout]) -> f64 {
        workouts
            .iter()
            .fold(0.0, |best, w| best.max(w.best_set_weight()))
    }

    /// Mean duration over the sessions that tracked one, rounded.
    fn avg_duration(&self, workouts: &[Workout]) -> u32 {
        let durations: Vec<u32> = workouts.iter().filter_map(|w| w.duration_minutes).collect();
        if durations.is_empty() {
            return 0;
        }

        let sum: u64 = durations.iter().map(|&d| u64::from(d)).sum();
        (sum as f64 / durations.len() as f64).round() as u32
    }

    /// Percent change in average per-session weight, comparing the ten
    /// most recent sessions (by date) against the first ten logged.
    ///
    /// Per-session weight sums set weights only, not weight x reps, so a
    /// heavier bar moves the number even at lower rep counts. Returns 0
    /// with fewer than two workouts or a zero baseline.
    pub fn strength_gain_percent(&self, workouts: &[Workout]) -> i32 {
        if workouts.len() < 2 {
            return 0;
        }

        let mut by_date: Vec<&Workout> = workouts.iter().collect();
        by_date.sort_by(|a, b| b.date.cmp(&a.date));

        let recent_avg = average_session_weight(by_date.iter().take(STRENGTH_GAIN_WINDOW).copied());
        let oldest_avg = average_session_weight(workouts.iter().take(STRENGTH_GAIN_WINDOW));

        if oldest_avg == 0.0 {
            return 0;
        }

        (((recent_avg - oldest_avg) / oldest_avg) * 100.0).round() as i32
    }

    /// Share of the last 30 days with at least one workout, percent.
    ///
    /// Counts workouts dated in `(today - 30, today]`; several workouts on
    /// one day all count, matching a raw session tally.
    pub fn consistency_percent(&self, workouts: &[Workout], today: NaiveDate) -> i32 {
        let cutoff = today - Duration::days(CONSISTENCY_WINDOW_DAYS);
        let count = workouts
            .iter()
            .filter(|w| w.date > cutoff && w.date <= today)
            .count();

        ((count as f64 / CONSISTENCY_WINDOW_DAYS as f64) * 100.0).round() as i32
    }

    /// Per-exercise max-weight trend, first occurrence vs latest.
    ///
    /// Exercises are grouped by logged name in first-encounter order; an
    /// exercise needs at least two occurrences to show a trend. At most
    /// four entries are returned.
    pub fn exercise_progress(&self, workouts: &[Workout]) -> Vec<ExerciseProgress> {
        let mut order: Vec<String> = Vec::new();
        let mut occurrences: HashMap<String, Vec<f64>> = HashMap::new();

        for workout in workouts {
            for exercise in &workout.exercises {
                if !occurrences.contains_key(&exercise.exercise_name) {
                    order.push(exercise.exercise_name.clone());
                }
                occurrences
                    .entry(exercise.exercise_name.clone())
                    .or_default()
                    .push(exercise.max_set_weight());
            }
        }

        let mut progress = Vec::new();
        for name in order {
            let weights = &occurrences[&name];
            if weights.len() < 2 {
                continue;
            }

            let first = weights[0];
            let last = weights[weights.len() - 1];
            let percent = if first == 0.0 {
                0
            } else {
                (((last - first) / first) * 100.0).round() as i32
            };

            progress.push(ExerciseProgress {
                exercise_name: name,
                progress_percent: percent,
            });

            if progress.len() == 4 {
                break;
            }
        }

        progress
    }
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Mean of per-session summed set weights over an iterator of workouts.
fn average_session_weight<'a>(workouts: impl Iterator<Item = &'a Workout>) -> f64 {
    let loads: Vec<f64> = workouts.map(session_weight).collect();
    if loads.is_empty() {
        return 0.0;
    }
    loads.iter().sum::<f64>() / loads.len() as f64
}

/// Sum of set weights in one session (weights only, reps ignored).
fn session_weight(workout: &Workout) -> f64 {
    workout
        .exercises
        .iter()
        .flat_map(|e| e.sets.iter())
        .map(|s| s.weight)
        .sum()
}
