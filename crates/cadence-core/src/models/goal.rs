// ABOUTME: Goal model with target/current values, deadline, and derived success probability
// ABOUTME: NewGoal validates target and deadline so invalid goals never reach the projector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AnalysisError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Display title
    pub title: String,
    /// Signal or measurement the goal tracks (e.g. `body_weight_kg`)
    pub metric: String,
    /// Unit of `target_value` and `current_value`
    pub unit: Option<String>,
    /// Value to reach
    pub target_value: f64,
    /// Latest known value
    pub current_value: f64,
    /// Start of the goal period
    pub created_at: DateTime<Utc>,
    /// End of the goal period
    pub deadline: DateTime<Utc>,
    /// Derived probability (0-100); recomputed, never user-edited
    pub success_probability: f64,
    /// Last recomputation
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Length of the goal period
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.deadline - self.created_at
    }

    /// Time elapsed since creation at `now`
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }
}

/// Goal creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    /// Owning user
    pub user_id: Uuid,
    /// Display title
    pub title: String,
    /// Tracked metric
    pub metric: String,
    /// Unit
    pub unit: Option<String>,
    /// Value to reach
    pub target_value: f64,
    /// Starting value
    pub current_value: f64,
    /// End of the goal period
    pub deadline: DateTime<Utc>,
}

impl NewGoal {
    /// Reject goals the projector cannot track
    ///
    /// # Errors
    ///
    /// Returns `InvalidGoalState` when the target is zero or not finite, the current
    /// value is not finite, or the deadline is not after `now`
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), AnalysisError> {
        if !self.target_value.is_finite() || self.target_value == 0.0 {
            return Err(AnalysisError::invalid_goal(
                "target value must be a non-zero number",
            ));
        }
        if !self.current_value.is_finite() {
            return Err(AnalysisError::invalid_goal(
                "current value must be a finite number",
            ));
        }
        if self.deadline <= now {
            return Err(AnalysisError::invalid_goal(format!(
                "deadline {} is not in the future",
                self.deadline.to_rfc3339()
            )));
        }
        Ok(())
    }

    /// Materialize the goal created at `now`
    #[must_use]
    pub fn into_goal(self, now: DateTime<Utc>, success_probability: f64) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            title: self.title,
            metric: self.metric,
            unit: self.unit,
            target_value: self.target_value,
            current_value: self.current_value,
            created_at: now,
            deadline: self.deadline,
            success_probability,
            updated_at: now,
        }
    }
}

/// A goal value observed at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgressPoint {
    /// Observation time
    pub recorded_at: DateTime<Utc>,
    /// Observed value
    pub value: f64,
}

/// Derived fields written back after projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalUpdate {
    /// Latest value
    pub current_value: f64,
    /// Projected probability (0-100)
    pub success_probability: f64,
    /// Instant the projection was evaluated at
    pub updated_at: DateTime<Utc>,
}
