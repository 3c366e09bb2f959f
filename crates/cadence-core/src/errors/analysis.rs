// ABOUTME: Error taxonomy for the training signal analysis engine
// ABOUTME: Covers insufficient paired data, invalid goals, rating bounds, and persistence aborts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised by signal alignment, correlation, and goal projection.
///
/// Zero-variance series are deliberately absent: a degenerate series
/// yields a correlation of 0 instead of an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// Fewer paired observations than the configured minimum
    #[error("insufficient data for {first} vs {second}: {paired} paired days, need {required}")]
    InsufficientData {
        /// First variable of the pair
        first: String,
        /// Second variable of the pair
        second: String,
        /// Paired observations found
        paired: usize,
        /// Configured minimum
        required: usize,
    },

    /// Goal cannot be created or projected (zero target, deadline not in the future)
    #[error("invalid goal state: {reason}")]
    InvalidGoalState {
        /// Why the goal was rejected
        reason: String,
    },

    /// Subjective rating outside the 1-10 scale
    #[error("{field} rating {value} is outside 1-10")]
    RatingOutOfRange {
        /// Rating field name
        field: &'static str,
        /// Rejected value
        value: i64,
    },

    /// Writing derived results failed; nothing from the run was kept
    #[error("analysis failed: {context}")]
    Persistence {
        /// Underlying failure
        context: String,
    },
}

impl AnalysisError {
    /// Create an invalid goal state error
    #[must_use]
    pub fn invalid_goal(reason: impl Into<String>) -> Self {
        Self::InvalidGoalState {
            reason: reason.into(),
        }
    }

    /// Whether the error is recovered locally by skipping the affected pair
    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
