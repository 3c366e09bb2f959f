// ABOUTME: Pure orchestration of one pattern analysis run over a user's signals
// ABOUTME: Aligns, correlates, synthesizes insights, and estimates per-variable trends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::alignment::{DayWindow, SeriesAligner};
use crate::config::EngineConfig;
use crate::correlation::CorrelationEngine;
use crate::insights::{InsightSynthesizer, InsightTemplates};
use crate::trend::{TrendAnalyzer, TrendEstimate};
use cadence_core::models::{PatternAnalysis, Signal};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Identity of one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunContext {
    /// User analyzed
    pub user_id: Uuid,
    /// Fresh id stamped on every row of the run
    pub run_id: Uuid,
    /// Creation time of the rows
    pub created_at: DateTime<Utc>,
}

impl RunContext {
    /// New run for `user_id` at `created_at`
    #[must_use]
    pub fn new(user_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            run_id: Uuid::new_v4(),
            created_at,
        }
    }
}

/// Everything one run produced
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    /// Ranked pattern rows to persist
    pub patterns: Vec<PatternAnalysis>,
    /// Per-variable trends
    pub trends: Vec<TrendEstimate>,
    /// Pairs with enough data to correlate
    pub evaluated_pairs: usize,
    /// Pairs skipped for insufficient data
    pub skipped_pairs: usize,
    /// Signals that fell inside the window
    pub signal_count: usize,
    /// Variables aligned
    pub variable_count: usize,
}

/// Runs the extraction-to-insight pipeline without touching storage
pub struct TrainingSignalEngine<'a> {
    config: &'a EngineConfig,
    synthesizer: InsightSynthesizer,
}

impl<'a> TrainingSignalEngine<'a> {
    /// Engine with the standard insight templates
    #[must_use]
    pub fn new(config: &'a EngineConfig) -> Self {
        Self::with_templates(config, InsightTemplates::standard())
    }

    /// Engine with custom insight templates
    #[must_use]
    pub fn with_templates(config: &'a EngineConfig, templates: InsightTemplates) -> Self {
        Self {
            config,
            synthesizer: InsightSynthesizer::new(templates, config.max_patterns_per_run),
        }
    }

    /// Analysis window ending on the UTC day of `now`
    #[must_use]
    pub fn window_ending(&self, now: DateTime<Utc>) -> DayWindow {
        DayWindow::ending_on(now.date_naive(), self.config.window_days)
    }

    /// Analyze `signals` over `window`
    #[must_use]
    pub fn analyze(
        &self,
        signals: &[Signal],
        context: &RunContext,
        window: DayWindow,
    ) -> AnalysisOutcome {
        let series = SeriesAligner::new(&self.config.reduction).align(signals, window);
        let summary = CorrelationEngine::new(self.config).analyze(&series);
        let patterns = self
            .synthesizer
            .synthesize(&summary.correlations, context, window.timeframe());

        let trends = series
            .values()
            .filter_map(|s| TrendAnalyzer::trend(s, &self.config.significance))
            .collect();

        AnalysisOutcome {
            patterns,
            trends,
            evaluated_pairs: summary.evaluated_pairs,
            skipped_pairs: summary.skipped_pairs,
            signal_count: signals
                .iter()
                .filter(|signal| window.contains(signal.day()))
                .count(),
            variable_count: series.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::constants::signals::{SLEEP_QUALITY, WORKOUT_INTENSITY};
    use cadence_core::models::SignificanceTier;
    use chrono::{Duration, TimeZone};

    fn scenario(now: DateTime<Utc>) -> Vec<Signal> {
        let sleep = [5.0, 6.0, 7.0, 8.0, 9.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let intensity = [50.0, 55.0, 60.0, 70.0, 80.0, 50.0, 55.0, 60.0, 70.0, 80.0];
        let mut signals = Vec::new();
        for (offset, (s, i)) in sleep.iter().zip(intensity).enumerate() {
            let at = now - Duration::days(9 - i64::try_from(offset).unwrap());
            signals.push(Signal::new(at, SLEEP_QUALITY, *s).unwrap());
            signals.push(Signal::new(at, WORKOUT_INTENSITY, i).unwrap());
        }
        signals
    }

    #[test]
    fn test_scenario_surfaces_single_high_pattern() {
        let now = Utc.with_ymd_and_hms(2025, 7, 10, 18, 0, 0).unwrap();
        let config = EngineConfig::default();
        let engine = TrainingSignalEngine::new(&config);
        let context = RunContext::new(Uuid::new_v4(), now);

        let outcome = engine.analyze(&scenario(now), &context, engine.window_ending(now));

        assert_eq!(outcome.patterns.len(), 1);
        let pattern = &outcome.patterns[0];
        assert_eq!(pattern.significance, SignificanceTier::High);
        assert_eq!(pattern.lag_days, 0);
        assert_eq!(pattern.run_id, context.run_id);
        assert_eq!(outcome.signal_count, 20);
        assert_eq!(outcome.trends.len(), 2);
    }

    #[test]
    fn test_reruns_match_values_with_new_rows() {
        let now = Utc.with_ymd_and_hms(2025, 7, 10, 18, 0, 0).unwrap();
        let config = EngineConfig::default();
        let engine = TrainingSignalEngine::new(&config);
        let signals = scenario(now);
        let window = engine.window_ending(now);

        let first = engine.analyze(&signals, &RunContext::new(Uuid::new_v4(), now), window);
        let second = engine.analyze(&signals, &RunContext::new(Uuid::new_v4(), now), window);

        assert_eq!(first.patterns.len(), second.patterns.len());
        for (a, b) in first.patterns.iter().zip(&second.patterns) {
            assert!((a.correlation - b.correlation).abs() < 1e-9);
            assert!((a.confidence - b.confidence).abs() < 1e-9);
            assert_ne!(a.id, b.id);
            assert_ne!(a.run_id, b.run_id);
        }
    }
}
