// ABOUTME: Training signal correlation and insight engine for Cadence
// ABOUTME: Extracts signals, aligns daily series, correlates pairs, and synthesizes insights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cadence Intelligence
//!
//! Statistical heuristics over a user's training history. Nothing here performs
//! I/O: callers read signals from their store, hand them to
//! [`TrainingSignalEngine`], and persist the returned pattern rows.
//!
//! Pipeline: [`SignalExtractor`] → [`SeriesAligner`] → [`CorrelationEngine`] →
//! [`InsightSynthesizer`]. [`GoalProgressProjector`] runs independently on goal history.
//!
//! The correlation engine reports co-movement, not causation, and the goal
//! projector is an ahead/behind-pace heuristic rather than a calibrated model.

/// Daily bucketing of irregular signals
pub mod alignment;
/// Engine configuration loaded from the environment
pub mod config;
/// Pearson and lag correlation with confidence scoring
pub mod correlation;
/// Pipeline orchestration
pub mod engine;
/// Signal extraction from journal entries and fitness tests
pub mod extraction;
/// Goal success probability projection
pub mod goal_projection;
/// Insight and recommendation text synthesis
pub mod insights;
/// Least-squares trend estimation
pub mod trend;

pub use alignment::{paired_observations, AlignedSeries, DayWindow, SeriesAligner};
pub use config::{
    ConfidenceCurve, ConfigError, EngineConfig, ReductionPolicies, ReductionPolicy,
    SignificanceThresholds,
};
pub use correlation::{pearson, CorrelationEngine, CorrelationSummary, PairCorrelation};
pub use engine::{AnalysisOutcome, RunContext, TrainingSignalEngine};
pub use extraction::SignalExtractor;
pub use goal_projection::{GoalProgressProjector, GoalProjection, PaceStatus, ProjectionBounds};
pub use insights::{display_name, InsightSynthesizer, InsightTemplate, InsightTemplates};
pub use trend::{Regression, TrendAnalyzer, TrendDirection, TrendEstimate};
