// ABOUTME: Pattern analysis result entity produced by the correlation engine
// ABOUTME: Rows are read-only and superseded by later runs rather than updated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Significance tier of a correlation
///
/// Ordered so that `High > Medium > Low`. `Low` relationships are never surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignificanceTier {
    /// Below the medium threshold; discarded
    Low,
    /// Above the medium threshold
    Medium,
    /// Above the high threshold
    High,
}

impl SignificanceTier {
    /// Stable storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse a storage name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Whether relationships in this tier become patterns
    #[must_use]
    pub const fn is_surfaced(self) -> bool {
        !matches!(self, Self::Low)
    }
}

/// Inclusive day range an analysis covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeframe {
    /// First day
    pub start: NaiveDate,
    /// Last day
    pub end: NaiveDate,
}

/// A surfaced relationship between two signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    /// Row identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Run that produced the row
    pub run_id: Uuid,
    /// Leading variable
    pub first_variable: String,
    /// Following variable
    pub second_variable: String,
    /// Pearson coefficient in [-1, 1]
    pub correlation: f64,
    /// Confidence in [0, 100]
    pub confidence: f64,
    /// Significance tier
    pub significance: SignificanceTier,
    /// Days by which `first_variable` leads `second_variable`
    pub lag_days: u32,
    /// Paired observations behind the coefficient
    pub sample_size: usize,
    /// Human-readable observation
    pub insight: String,
    /// Suggested action
    pub recommendation: String,
    /// Analyzed window
    pub timeframe: Timeframe,
    /// Creation time
    pub created_at: DateTime<Utc>,
}
