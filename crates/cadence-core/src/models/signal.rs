// ABOUTME: Normalized numeric signal sample extracted from journal entries and fitness tests
// ABOUTME: Construction rejects non-finite values so every signal carries a usable number
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// A `(timestamp, variable, value)` sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    recorded_at: DateTime<Utc>,
    variable: String,
    value: f64,
}

impl Signal {
    /// Create a signal; returns `None` when `value` is NaN or infinite
    #[must_use]
    pub fn new(recorded_at: DateTime<Utc>, variable: impl Into<String>, value: f64) -> Option<Self> {
        value.is_finite().then(|| Self {
            recorded_at,
            variable: variable.into(),
            value,
        })
    }

    /// When the sample was recorded
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// UTC calendar day bucket of the sample
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.recorded_at.date_naive()
    }

    /// Variable name
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Finite sample value
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}
