// ABOUTME: Pearson and lagged correlation between aligned daily series
// ABOUTME: Scores confidence, classifies significance, and evaluates variable pairs in parallel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::alignment::{paired_observations, AlignedSeries};
use crate::config::EngineConfig;
use cadence_core::errors::AnalysisError;
use cadence_core::models::SignificanceTier;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::iter;
use tracing::{debug, warn};

/// Pearson correlation coefficient of `(x, y)` pairs.
///
/// `r = (nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²))`, computed on
/// mean-centered values. Degenerate input (fewer than two pairs, a constant
/// side, or a non-finite denominator) yields `0.0` instead of an error.
#[must_use]
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2
        || is_constant(pairs.iter().map(|p| p.0))
        || is_constant(pairs.iter().map(|p| p.1))
    {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (sum_xy, sum_xx, sum_yy) = pairs.iter().fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(xy, xx, yy), &(x, y)| {
            let dx = x - mean_x;
            let dy = y - mean_y;
            (dx.mul_add(dy, xy), dx.mul_add(dx, xx), dy.mul_add(dy, yy))
        },
    );

    let denominator = (sum_xx * sum_yy).sqrt();
    if !denominator.is_finite() || denominator <= 0.0 {
        return 0.0;
    }

    let r = sum_xy / denominator;
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    values
        .next()
        .map_or(true, |first| values.all(|value| value == first))
}

/// Correlation between two variables at a given lead
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairCorrelation {
    /// Leading variable
    pub first: String,
    /// Following variable
    pub second: String,
    /// Pearson coefficient
    pub correlation: f64,
    /// Confidence in [0, 100]
    pub confidence: f64,
    /// Tier of `|correlation|`
    pub significance: SignificanceTier,
    /// Days by which `first` leads `second`
    pub lag_days: u32,
    /// Paired observations used
    pub sample_size: usize,
}

impl PairCorrelation {
    /// Variable names in name order, independent of lead direction
    #[must_use]
    pub fn unordered_key(&self) -> (&str, &str) {
        if self.first <= self.second {
            (&self.first, &self.second)
        } else {
            (&self.second, &self.first)
        }
    }

    /// Whether the variables move together
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.correlation >= 0.0
    }
}

/// Result of evaluating every pair in one run
#[derive(Debug, Clone, Default)]
pub struct CorrelationSummary {
    /// Surfaced (medium or high) correlations, ordered by variable names
    pub correlations: Vec<PairCorrelation>,
    /// Pairs that had enough data to be evaluated
    pub evaluated_pairs: usize,
    /// Pairs skipped for insufficient paired observations
    pub skipped_pairs: usize,
}

/// Computes pairwise correlations under an `EngineConfig`
pub struct CorrelationEngine<'a> {
    config: &'a EngineConfig,
}

impl<'a> CorrelationEngine<'a> {
    /// Create an engine bound to `config`
    #[must_use]
    pub const fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Correlate `first[d]` with `second[d + lag_days]`
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when fewer than the configured minimum days pair up
    pub fn correlate(
        &self,
        first: &AlignedSeries,
        second: &AlignedSeries,
        lag_days: u32,
    ) -> Result<PairCorrelation, AnalysisError> {
        let pairs = paired_observations(
            first,
            second,
            lag_days,
            self.config.min_paired_observations,
        )?;
        let correlation = pearson(&pairs);

        Ok(PairCorrelation {
            first: first.variable().to_owned(),
            second: second.variable().to_owned(),
            correlation,
            confidence: self.config.confidence.score(correlation, pairs.len()),
            significance: self.config.significance.classify(correlation),
            lag_days,
            sample_size: pairs.len(),
        })
    }

    /// Strongest relationship between two series across lags and lead directions.
    ///
    /// Same-day is tried first, then each lag `1..=max_lag_days` with `a` leading and
    /// then `b` leading. A candidate replaces the current best only with a strictly
    /// larger `|r|`, so ties keep the smaller lag and same-day wins ties at lag 0.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when no candidate has enough paired days, or the
    /// first error that is not recoverable by skipping the candidate
    pub fn strongest_relationship(
        &self,
        a: &AlignedSeries,
        b: &AlignedSeries,
    ) -> Result<PairCorrelation, AnalysisError> {
        let mut best: Option<PairCorrelation> = None;
        let mut first_failure = None;

        let candidates = iter::once((a, b, 0)).chain(
            (1..=self.config.max_lag_days).flat_map(|lag| [(a, b, lag), (b, a, lag)]),
        );

        for (leader, follower, lag) in candidates {
            match self.correlate(leader, follower, lag) {
                Ok(candidate) => {
                    let stronger = best.as_ref().map_or(true, |current| {
                        candidate.correlation.abs() > current.correlation.abs()
                    });
                    if stronger {
                        best = Some(candidate);
                    }
                }
                Err(error) if error.is_skippable() => {
                    first_failure.get_or_insert(error);
                }
                Err(error) => return Err(error),
            }
        }

        best.ok_or_else(|| {
            first_failure.unwrap_or_else(|| AnalysisError::InsufficientData {
                first: a.variable().to_owned(),
                second: b.variable().to_owned(),
                paired: 0,
                required: self.config.min_paired_observations,
            })
        })
    }

    /// Evaluate every unordered pair of series.
    ///
    /// Pairs run in parallel; the output order follows variable names and does not
    /// depend on scheduling.
    #[must_use]
    pub fn analyze(&self, series: &BTreeMap<String, AlignedSeries>) -> CorrelationSummary {
        let minimum = self.config.min_paired_observations;
        let candidates: Vec<&AlignedSeries> = series
            .values()
            .filter(|s| s.observed_days() >= minimum)
            .collect();

        let total_pairs = series.len() * series.len().saturating_sub(1) / 2;
        let pairs: Vec<(&AlignedSeries, &AlignedSeries)> = candidates
            .iter()
            .enumerate()
            .flat_map(|(i, a)| candidates[i + 1..].iter().map(move |b| (*a, *b)))
            .collect();

        let results: Vec<Option<PairCorrelation>> = pairs
            .par_iter()
            .map(|(a, b)| match self.strongest_relationship(a, b) {
                Ok(correlation) => Some(correlation),
                Err(error) if error.is_skippable() => {
                    debug!(
                        pair.first = a.variable(),
                        pair.second = b.variable(),
                        error = %error,
                        "Skipping variable pair"
                    );
                    None
                }
                Err(error) => {
                    warn!(
                        pair.first = a.variable(),
                        pair.second = b.variable(),
                        error = %error,
                        "Variable pair failed unexpectedly"
                    );
                    None
                }
            })
            .collect();

        let evaluated: Vec<PairCorrelation> = results.into_iter().flatten().collect();
        let evaluated_pairs = evaluated.len();

        CorrelationSummary {
            correlations: evaluated
                .into_iter()
                .filter(|c| c.significance.is_surfaced())
                .collect(),
            evaluated_pairs,
            skipped_pairs: total_pairs - evaluated_pairs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::DayWindow;
    use chrono::NaiveDate;

    fn series(name: &str, values: &[f64]) -> AlignedSeries {
        let end = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let window = DayWindow::ending_on(end, u32::try_from(values.len()).unwrap());
        let daily: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        AlignedSeries::from_daily_values(name, window, &daily)
    }

    fn zip(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
        x.iter().copied().zip(y.iter().copied()).collect()
    }

    const SLEEP: [f64; 10] = [5.0, 6.0, 7.0, 8.0, 9.0, 5.0, 6.0, 7.0, 8.0, 9.0];
    const INTENSITY: [f64; 10] = [50.0, 55.0, 60.0, 70.0, 80.0, 50.0, 55.0, 60.0, 70.0, 80.0];

    #[test]
    fn test_pearson_is_symmetric() {
        let x = [1.0, 3.0, 2.0, 5.0, 4.0, 6.5];
        let y = [2.0, 1.0, 4.0, 3.0, 7.0, 5.0];
        let forward = pearson(&zip(&x, &y));
        let backward = pearson(&zip(&y, &x));
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_self_correlation_is_one() {
        let x = [3.0, 1.5, 4.0, 1.0, 5.9];
        assert!((pearson(&zip(&x, &x)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_degenerate_inputs_are_zero() {
        let constant = [0.1, 0.1, 0.1, 0.1];
        let other = [1.0, 2.0, 3.0, 4.0];
        assert!(pearson(&zip(&constant, &other)).abs() < f64::EPSILON);
        assert!(pearson(&zip(&other, &constant)).abs() < f64::EPSILON);
        assert!(pearson(&[(1.0, 2.0)]).abs() < f64::EPSILON);
        assert!(pearson(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sleep_intensity_scenario_is_high() {
        let config = EngineConfig::default();
        let engine = CorrelationEngine::new(&config);
        let result = engine
            .correlate(
                &series("sleep_quality", &SLEEP),
                &series("workout_intensity", &INTENSITY),
                0,
            )
            .unwrap();

        assert!(result.correlation > 0.95, "r = {}", result.correlation);
        assert_eq!(result.significance, SignificanceTier::High);
        assert_eq!(result.sample_size, 10);
    }

    #[test]
    fn test_confidence_monotonic_in_r_and_n() {
        let config = EngineConfig::default();
        let curve = config.confidence;
        let mut previous = 0.0;
        for step in 0..=20 {
            let score = curve.score(f64::from(step) / 20.0, 12);
            assert!(score >= previous);
            previous = score;
        }
        previous = 0.0;
        for n in 0..60 {
            let score = curve.score(0.4, n);
            assert!(score >= previous);
            assert!((0.0..=100.0).contains(&score));
            previous = score;
        }
    }

    #[test]
    fn test_insufficient_pairs_produce_nothing() {
        let config = EngineConfig::default();
        let engine = CorrelationEngine::new(&config);
        let mut map = BTreeMap::new();
        map.insert("a".to_owned(), series("a", &SLEEP[..9]));
        map.insert("b".to_owned(), series("b", &INTENSITY[..9]));

        let summary = engine.analyze(&map);
        assert!(summary.correlations.is_empty());
        assert_eq!(summary.evaluated_pairs, 0);
        assert_eq!(summary.skipped_pairs, 1);
    }

    #[test]
    fn test_next_day_effect_reports_lag() {
        let sleep = [5.0, 9.0, 4.0, 8.0, 3.0, 7.0, 6.0, 2.0, 9.0, 5.0, 8.0, 4.0, 7.0, 3.0, 6.0];
        let mut energy = vec![5.0];
        energy.extend_from_slice(&sleep[..sleep.len() - 1]);

        let config = EngineConfig::default();
        let engine = CorrelationEngine::new(&config);
        let best = engine
            .strongest_relationship(&series("energy", &energy), &series("sleep_quality", &sleep))
            .unwrap();

        assert_eq!(best.first, "sleep_quality");
        assert_eq!(best.second, "energy");
        assert_eq!(best.lag_days, 1);
        assert!((best.correlation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_strength_lags_keep_same_day() {
        let steady: Vec<f64> = (1..=14).map(f64::from).collect();
        let config = EngineConfig::default();
        let engine = CorrelationEngine::new(&config);
        let first = series("sleep_hours", &steady);
        let second = series("workout_duration_minutes", &steady);

        for lag in 0..=config.max_lag_days {
            let candidate = engine.correlate(&first, &second, lag).unwrap();
            assert!((candidate.correlation - 1.0).abs() < f64::EPSILON);
        }

        let best = engine.strongest_relationship(&first, &second).unwrap();
        assert_eq!(best.lag_days, 0);
        assert_eq!(best.first, "sleep_hours");
        assert_eq!(best.sample_size, 14);

        let reversed = engine.strongest_relationship(&second, &first).unwrap();
        assert_eq!(reversed.lag_days, 0);
        assert_eq!(reversed.first, "workout_duration_minutes");
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let config = EngineConfig::default();
        let engine = CorrelationEngine::new(&config);
        let mut map = BTreeMap::new();
        map.insert("sleep_quality".to_owned(), series("sleep_quality", &SLEEP));
        map.insert("workout_intensity".to_owned(), series("workout_intensity", &INTENSITY));
        map.insert(
            "stress".to_owned(),
            series("stress", &[9.0, 8.0, 7.0, 5.0, 3.0, 9.0, 8.0, 7.0, 5.0, 3.0]),
        );

        let first = engine.analyze(&map);
        let second = engine.analyze(&map);
        assert_eq!(first.correlations, second.correlations);
        assert_eq!(first.evaluated_pairs, 3);
    }
}
