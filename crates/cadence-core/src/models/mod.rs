// ABOUTME: Core data models for journal entries, fitness tests, signals, goals, and patterns
// ABOUTME: Every entity is scoped to exactly one user; analysis entities are append-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Domain types shared by the intelligence engine and the persistence layer.
//! Database rows are mapped into these types in one place, so analysis code
//! never handles raw rows.

mod fitness_test;
mod goal;
mod journal;
mod pattern;
mod signal;

pub use fitness_test::{FitnessTest, FitnessTestType, TestProtocol, TestResult};
pub use goal::{Goal, GoalProgressPoint, GoalUpdate, NewGoal};
pub use journal::{
    BiometricMetrics, JournalEntry, NutritionMetrics, Rating, SleepMetrics, SubjectiveMetrics,
    WorkoutMetrics,
};
pub use pattern::{PatternAnalysis, SignificanceTier, Timeframe};
pub use signal::Signal;
