// ABOUTME: Fitness test model with protocol metadata and primary/secondary numeric results
// ABOUTME: Tests are append-only point-in-time measurements owned by one user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::iter;
use uuid::Uuid;

/// Category of fitness test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessTestType {
    /// Maximal or repetition strength
    Strength,
    /// Aerobic endurance
    Endurance,
    /// Power output
    Power,
    /// Range of motion
    Flexibility,
    /// Body composition measurement
    BodyComposition,
    /// Joint mobility screen
    Mobility,
}

impl FitnessTestType {
    /// Stable storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Endurance => "endurance",
            Self::Power => "power",
            Self::Flexibility => "flexibility",
            Self::BodyComposition => "body_composition",
            Self::Mobility => "mobility",
        }
    }

    /// Parse a storage name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "strength" => Some(Self::Strength),
            "endurance" => Some(Self::Endurance),
            "power" => Some(Self::Power),
            "flexibility" => Some(Self::Flexibility),
            "body_composition" => Some(Self::BodyComposition),
            "mobility" => Some(Self::Mobility),
            _ => None,
        }
    }
}

/// How the test was performed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestProtocol {
    /// Protocol name (e.g. "Cooper 12-minute run")
    pub name: String,
    /// Test duration in seconds, when timed
    pub duration_seconds: Option<u32>,
    /// Equipment used
    pub equipment: Vec<String>,
    /// Free-form instructions
    pub instructions: Option<String>,
}

/// One measured result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Metric name (e.g. "vo2max", "1rm squat")
    pub metric: String,
    /// Measured value
    pub value: f64,
    /// Measurement unit
    pub unit: String,
}

impl TestResult {
    /// Create a result
    #[must_use]
    pub fn new(metric: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// A completed fitness test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessTest {
    /// Test identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Category
    pub test_type: FitnessTestType,
    /// Protocol metadata
    pub protocol: TestProtocol,
    /// Headline result
    pub primary_result: TestResult,
    /// Additional results
    pub secondary_results: Vec<TestResult>,
    /// When the test was performed
    pub performed_at: DateTime<Utc>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl FitnessTest {
    /// Create a test with no secondary results
    #[must_use]
    pub fn new(
        user_id: Uuid,
        test_type: FitnessTestType,
        protocol: TestProtocol,
        primary_result: TestResult,
        performed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            test_type,
            protocol,
            primary_result,
            secondary_results: Vec::new(),
            performed_at,
            notes: None,
        }
    }

    /// All results, primary first
    pub fn results(&self) -> impl Iterator<Item = &TestResult> {
        iter::once(&self.primary_result).chain(self.secondary_results.iter())
    }
}
