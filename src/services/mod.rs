// ABOUTME: Service layer orchestrating persistence and the correlation engine
// ABOUTME: Services are constructed per request over a borrowed store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Pattern analysis and goal projection service
pub mod analysis;

pub use analysis::{AnalysisRun, GoalSnapshot, TrainingAnalysisService};
