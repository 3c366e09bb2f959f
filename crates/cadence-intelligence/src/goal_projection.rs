// ABOUTME: Ahead/behind-pace heuristic for goal success probability
// ABOUTME: Compares value progress with time progress around a fixed on-pace baseline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::trend::TrendAnalyzer;
use cadence_core::constants::goals;
use cadence_core::errors::AnalysisError;
use cadence_core::models::{Goal, GoalProgressPoint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Shape of the probability heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionBounds {
    /// Probability when value progress equals time progress
    pub baseline: f64,
    /// Highest reported probability
    pub ceiling: f64,
    /// Lowest reported probability
    pub floor: f64,
    /// Points per unit of lead or lag
    pub pace_scale: f64,
}

impl Default for ProjectionBounds {
    fn default() -> Self {
        Self {
            baseline: goals::BASELINE_PROBABILITY,
            ceiling: goals::MAX_PROBABILITY,
            floor: goals::MIN_PROBABILITY,
            pace_scale: goals::PACE_SCALE,
        }
    }
}

/// Whether the goal is ahead of, on, or behind the straight-line schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStatus {
    /// More value progress than time progress
    Ahead,
    /// Exactly on schedule
    OnPace,
    /// Less value progress than time progress
    Behind,
}

/// Projection for one goal at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProjection {
    /// Goal projected
    pub goal_id: Uuid,
    /// Value used as current (latest history sample, else the stored value)
    pub current_value: f64,
    /// Share of the goal period elapsed, in [0, 1]
    pub time_progress: f64,
    /// `current / target`
    pub value_progress: f64,
    /// Heuristic success probability in [floor, ceiling]
    pub success_probability: f64,
    /// Pace classification
    pub pace: PaceStatus,
    /// Least-squares change per day over the history, when at least two samples exist
    pub rate_per_day: Option<f64>,
    /// Current value extended at `rate_per_day` until the deadline
    pub projected_value_at_deadline: Option<f64>,
}

/// Heuristic goal projector.
///
/// On pace scores the baseline (70). Each unit of lead adds `pace_scale` points up to
/// the ceiling (95) and each unit of lag removes them down to the floor (10). This
/// frames pace only; it is not a calibrated likelihood.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalProgressProjector {
    bounds: ProjectionBounds,
}

impl GoalProgressProjector {
    /// Projector with custom bounds
    #[must_use]
    pub const fn new(bounds: ProjectionBounds) -> Self {
        Self { bounds }
    }

    /// Success probability for the given progress ratios
    #[must_use]
    pub fn probability(&self, time_progress: f64, value_progress: f64) -> f64 {
        let lead = value_progress - time_progress;
        let ProjectionBounds {
            baseline,
            ceiling,
            floor,
            pace_scale,
        } = self.bounds;

        if !lead.is_finite() {
            return if lead > 0.0 { ceiling } else { floor };
        }
        if lead > 0.0 {
            lead.mul_add(pace_scale, baseline).min(ceiling)
        } else if lead < 0.0 {
            lead.mul_add(pace_scale, baseline).max(floor)
        } else {
            baseline
        }
    }

    /// Project `goal` at `now` from its value history
    ///
    /// # Errors
    ///
    /// Returns `InvalidGoalState` for a zero or non-finite target or a deadline that
    /// does not follow creation
    pub fn project(
        &self,
        goal: &Goal,
        history: &[GoalProgressPoint],
        now: DateTime<Utc>,
    ) -> Result<GoalProjection, AnalysisError> {
        if goal.target_value == 0.0 || !goal.target_value.is_finite() {
            return Err(AnalysisError::invalid_goal(
                "target value must be a non-zero number",
            ));
        }
        let total_seconds = goal.total_duration().num_seconds();
        if total_seconds <= 0 {
            return Err(AnalysisError::invalid_goal(
                "deadline must be after the goal was created",
            ));
        }

        let current_value = history
            .iter()
            .filter(|point| point.value.is_finite())
            .max_by_key(|point| point.recorded_at)
            .map_or(goal.current_value, |point| point.value);

        let elapsed_seconds = goal.elapsed(now).num_seconds() as f64;
        let time_progress = (elapsed_seconds / total_seconds as f64).clamp(0.0, 1.0);
        let value_progress = current_value / goal.target_value;

        let pace = match value_progress.partial_cmp(&time_progress) {
            Some(Ordering::Greater) => PaceStatus::Ahead,
            Some(Ordering::Less) => PaceStatus::Behind,
            _ => PaceStatus::OnPace,
        };

        let rate_per_day = Self::rate_per_day(history);
        let remaining_seconds = (goal.deadline - now).num_seconds().max(0);
        let remaining_days = remaining_seconds as f64 / SECONDS_PER_DAY;
        let projected_value_at_deadline =
            rate_per_day.map(|rate| rate.mul_add(remaining_days, current_value));

        Ok(GoalProjection {
            goal_id: goal.id,
            current_value,
            time_progress,
            value_progress,
            success_probability: self.probability(time_progress, value_progress),
            pace,
            rate_per_day,
            projected_value_at_deadline,
        })
    }

    fn rate_per_day(history: &[GoalProgressPoint]) -> Option<f64> {
        let origin = history.iter().map(|point| point.recorded_at).min()?;
        let points: Vec<(f64, f64)> = history
            .iter()
            .filter(|point| point.value.is_finite())
            .map(|point| {
                let days = (point.recorded_at - origin).num_seconds() as f64 / SECONDS_PER_DAY;
                (days, point.value)
            })
            .collect();
        TrendAnalyzer::linear_regression(&points).map(|fit| fit.slope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn goal(
        target: f64,
        current: f64,
        created_days_ago: i64,
        due_in_days: i64,
    ) -> (Goal, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        let goal = Goal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Squat 100kg".into(),
            metric: "fitness_test.1rm_back_squat".into(),
            unit: Some("kg".into()),
            target_value: target,
            current_value: current,
            created_at: now - Duration::days(created_days_ago),
            deadline: now + Duration::days(due_in_days),
            success_probability: 0.0,
            updated_at: now,
        };
        (goal, now)
    }

    #[test]
    fn test_on_pace_is_exactly_baseline() {
        let (goal, now) = goal(100.0, 50.0, 30, 30);
        let projection = GoalProgressProjector::default()
            .project(&goal, &[], now)
            .unwrap();
        assert!((projection.time_progress - 0.5).abs() < f64::EPSILON);
        assert!((projection.success_probability - 70.0).abs() < f64::EPSILON);
        assert_eq!(projection.pace, PaceStatus::OnPace);
    }

    #[test]
    fn test_probability_bounded_and_continuous() {
        let projector = GoalProgressProjector::default();
        assert!((projector.probability(0.0, 5.0) - 95.0).abs() < f64::EPSILON);
        assert!((projector.probability(1.0, -3.0) - 10.0).abs() < f64::EPSILON);
        assert!((projector.probability(0.5, 0.6) - 80.0).abs() < 1e-9);
        assert!((projector.probability(0.6, 0.5) - 60.0).abs() < 1e-9);

        let just_ahead = projector.probability(0.5, 0.5 + 1e-9);
        let just_behind = projector.probability(0.5, 0.5 - 1e-9);
        assert!((just_ahead - 70.0).abs() < 1e-6);
        assert!((just_behind - 70.0).abs() < 1e-6);

        for step in 0..=40 {
            let value = f64::from(step) / 10.0 - 1.0;
            let p = projector.probability(0.3, value);
            assert!((10.0..=95.0).contains(&p));
        }
    }

    #[test]
    fn test_history_drives_current_value_and_rate() {
        let (goal, now) = goal(100.0, 40.0, 10, 10);
        let history = vec![
            GoalProgressPoint {
                recorded_at: now - Duration::days(4),
                value: 60.0,
            },
            GoalProgressPoint {
                recorded_at: now,
                value: 80.0,
            },
        ];
        let projection = GoalProgressProjector::default()
            .project(&goal, &history, now)
            .unwrap();

        assert!((projection.current_value - 80.0).abs() < f64::EPSILON);
        assert_eq!(projection.pace, PaceStatus::Ahead);
        assert!((projection.rate_per_day.unwrap() - 5.0).abs() < 1e-9);
        assert!((projection.projected_value_at_deadline.unwrap() - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_goals_rejected() {
        let (mut goal, now) = goal(0.0, 10.0, 5, 5);
        assert!(matches!(
            GoalProgressProjector::default().project(&goal, &[], now),
            Err(AnalysisError::InvalidGoalState { .. })
        ));

        goal.target_value = 50.0;
        goal.deadline = goal.created_at;
        assert!(GoalProgressProjector::default()
            .project(&goal, &[], now)
            .is_err());
    }
}
