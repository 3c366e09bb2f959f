// ABOUTME: Core data models re-exported from cadence-core
// ABOUTME: Journal entries, fitness tests, signals, goals, and pattern analyses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `JournalEntry`: one user-submitted day of training, nutrition, and wellbeing data
//! - `FitnessTest`: an append-only measurement with a protocol and results
//! - `Signal`: a normalized `(recorded_at, variable, value)` sample
//! - `Goal` / `NewGoal`: a target with a derived success probability
//! - `PatternAnalysis`: a surfaced relationship between two signals

pub use cadence_core::models::*;
