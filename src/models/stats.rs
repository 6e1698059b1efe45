//! Derived user statistics.
//!
//! Every field except `weekly_goal.target` is recomputed from the workout
//! collection after each workout mutation; the target is a user setting
//! and is carried forward unchanged.

use serde::{Deserialize, Serialize};

/// Default weekly workout target for fresh profiles.
pub const DEFAULT_WEEKLY_TARGET: u32 = 3;

/// Progress against the weekly workout target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyGoal {
    /// Workouts logged in the current week
    pub current: u32,
    /// Workouts aimed for per week
    pub target: u32,
}

impl Default for WeeklyGoal {
    fn default() -> Self {
        Self {
            current: 0,
            target: DEFAULT_WEEKLY_TARGET,
        }
    }
}

impl WeeklyGoal {
    /// Whether the target has been met this week.
    pub fn is_met(&self) -> bool {
        self.target > 0 && self.current >= self.target
    }
}

/// Aggregate statistics over the workout history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    /// Total workouts ever logged
    pub total_workouts: u32,
    /// Consecutive training days ending at (or the day before) today
    pub current_streak: u32,
    /// Weekly target and progress toward it
    pub weekly_goal: WeeklyGoal,
    /// Workouts logged this week
    pub this_week: u32,
    /// Lifetime volume: weight x reps summed over every set
    pub total_weight: f64,
    /// Heaviest single-set weight ever logged
    pub best_set: f64,
    /// Mean session length in minutes, over sessions that tracked one
    pub avg_duration: u32,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_workouts: 0,
            current_streak: 0,
            weekly_goal: WeeklyGoal::default(),
            this_week: 0,
            total_weight: 0.0,
            best_set: 0.0,
            avg_duration: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats_are_zero_with_target_three() {
        let stats = UserStats::default();
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.weekly_goal.current, 0);
        assert_eq!(stats.weekly_goal.target, DEFAULT_WEEKLY_TARGET);
        assert_eq!(stats.total_weight, 0.0);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let stats: UserStats = serde_json::from_str(r#"{"total_workouts":12}"#).unwrap();
        assert_eq!(stats.total_workouts, 12);
        assert_eq!(stats.weekly_goal.target, 3);
        assert_eq!(stats.avg_duration, 0);
    }

    #[test]
    fn test_weekly_goal_is_met() {
        assert!(WeeklyGoal {
            current: 3,
            target: 3
        }
        .is_met());
        assert!(!WeeklyGoal {
            current: 2,
            target: 3
        }
        .is_met());
        assert!(!WeeklyGoal {
            current: 5,
            target: 0
        }
        .is_met());
    }
}
