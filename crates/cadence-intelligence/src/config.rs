// ABOUTME: Configuration-driven parameters for the correlation engine replacing magic numbers
// ABOUTME: Declares per-variable reduction policies, thresholds, and the confidence curve
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cadence_core::constants::{analysis, signals};
use cadence_core::models::SignificanceTier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable could not be parsed
    #[error("Invalid value for {variable}: {value}")]
    Parse {
        /// Environment variable name
        variable: &'static str,
        /// Raw value
        value: String,
    },

    /// Values parsed but are inconsistent
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// How several same-day samples of one variable collapse into one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionPolicy {
    /// Average of the day's samples (rate-like variables)
    Mean,
    /// Most recent sample of the day (state-like variables such as body weight)
    LastWrite,
}

/// Declared reduction policy per variable
///
/// Variables without a declaration are not aligned at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReductionPolicies {
    exact: HashMap<String, ReductionPolicy>,
    prefixes: Vec<(String, ReductionPolicy)>,
}

impl ReductionPolicies {
    /// Policies for every built-in journal variable plus fitness-test results
    #[must_use]
    pub fn standard() -> Self {
        let mut policies = Self::default();
        for name in signals::RATE_LIKE {
            policies.declare(*name, ReductionPolicy::Mean);
        }
        for name in signals::STATE_LIKE {
            policies.declare(*name, ReductionPolicy::LastWrite);
        }
        policies.declare_prefix(signals::FITNESS_TEST_PREFIX, ReductionPolicy::LastWrite);
        policies
    }

    /// Declare the policy for one variable
    pub fn declare(&mut self, variable: impl Into<String>, policy: ReductionPolicy) {
        self.exact.insert(variable.into(), policy);
    }

    /// Declare the policy for every variable starting with `prefix`
    pub fn declare_prefix(&mut self, prefix: impl Into<String>, policy: ReductionPolicy) {
        self.prefixes.push((prefix.into(), policy));
    }

    /// Policy for `variable`; exact declarations win over prefixes
    #[must_use]
    pub fn policy_for(&self, variable: &str) -> Option<ReductionPolicy> {
        self.exact.get(variable).copied().or_else(|| {
            self.prefixes
                .iter()
                .find(|(prefix, _)| variable.starts_with(prefix.as_str()))
                .map(|(_, policy)| *policy)
        })
    }
}

/// |r| cut-offs for significance tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceThresholds {
    /// Strictly above this is `High`
    pub high: f64,
    /// Strictly above this is `Medium`
    pub medium: f64,
}

impl Default for SignificanceThresholds {
    fn default() -> Self {
        Self {
            high: analysis::HIGH_SIGNIFICANCE_THRESHOLD,
            medium: analysis::MEDIUM_SIGNIFICANCE_THRESHOLD,
        }
    }
}

impl SignificanceThresholds {
    /// Tier for a correlation coefficient
    #[must_use]
    pub fn classify(&self, correlation: f64) -> SignificanceTier {
        let magnitude = correlation.abs();
        if magnitude > self.high {
            SignificanceTier::High
        } else if magnitude > self.medium {
            SignificanceTier::Medium
        } else {
            SignificanceTier::Low
        }
    }
}

/// Confidence curve: `min(100, |r|·100·w + min(n/N, 1)·p)`
///
/// With the defaults (`w = 0.8`, `p = 20`, `N = 30`) a perfect correlation over a
/// month of paired days scores 100. The score rises with both `|r|` and `n` and is
/// a ranking aid, not a probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceCurve {
    /// Weight `w` of the correlation component
    pub correlation_weight: f64,
    /// Points `p` awarded once the sample size saturates
    pub sample_points: f64,
    /// Sample size `N` at which the sample component saturates
    pub saturation_samples: usize,
}

impl Default for ConfidenceCurve {
    fn default() -> Self {
        Self {
            correlation_weight: analysis::CONFIDENCE_CORRELATION_WEIGHT,
            sample_points: analysis::CONFIDENCE_SAMPLE_POINTS,
            saturation_samples: analysis::CONFIDENCE_SATURATION_SAMPLES,
        }
    }
}

impl ConfidenceCurve {
    /// Confidence in [0, 100] for coefficient `correlation` over `sample_size` pairs
    #[must_use]
    pub fn score(&self, correlation: f64, sample_size: usize) -> f64 {
        let magnitude = if correlation.is_finite() {
            correlation.abs().min(1.0)
        } else {
            0.0
        };
        let correlation_part = magnitude * analysis::MAX_CONFIDENCE * self.correlation_weight;
        let saturation = self.saturation_samples.max(1) as f64;
        let sample_part = (sample_size as f64 / saturation).min(1.0) * self.sample_points;
        (correlation_part + sample_part).clamp(0.0, analysis::MAX_CONFIDENCE)
    }
}

/// Correlation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// History window in days ending on the analysis date
    pub window_days: u32,
    /// Minimum paired daily observations per variable pair
    pub min_paired_observations: usize,
    /// Largest lag (days) evaluated; 0 disables lag search
    pub max_lag_days: u32,
    /// Significance cut-offs
    pub significance: SignificanceThresholds,
    /// Confidence curve parameters
    pub confidence: ConfidenceCurve,
    /// Per-variable same-day reduction
    pub reduction: ReductionPolicies,
    /// Maximum pattern rows kept per run
    pub max_patterns_per_run: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_days: analysis::DEFAULT_WINDOW_DAYS,
            min_paired_observations: analysis::MIN_PAIRED_OBSERVATIONS,
            max_lag_days: analysis::DEFAULT_MAX_LAG_DAYS,
            significance: SignificanceThresholds::default(),
            confidence: ConfidenceCurve::default(),
            reduction: ReductionPolicies::standard(),
            max_patterns_per_run: analysis::DEFAULT_MAX_PATTERNS_PER_RUN,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    pub fn from_environment() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(days) = env_override("CADENCE_ANALYSIS_WINDOW_DAYS")? {
            config.window_days = days;
        }
        if let Some(minimum) = env_override("CADENCE_MIN_PAIRED_OBSERVATIONS")? {
            config.min_paired_observations = minimum;
        }
        if let Some(lag) = env_override("CADENCE_MAX_LAG_DAYS")? {
            config.max_lag_days = lag;
        }
        if let Some(high) = env_override("CADENCE_HIGH_SIGNIFICANCE_THRESHOLD")? {
            config.significance.high = high;
        }
        if let Some(medium) = env_override("CADENCE_MEDIUM_SIGNIFICANCE_THRESHOLD")? {
            config.significance.medium = medium;
        }
        if let Some(max_patterns) = env_override("CADENCE_MAX_PATTERNS_PER_RUN")? {
            config.max_patterns_per_run = max_patterns;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_days == 0 {
            return Err(ConfigError::ValidationFailed(
                "window_days must be > 0".into(),
            ));
        }
        if self.window_days > analysis::MAX_WINDOW_DAYS {
            return Err(ConfigError::ValidationFailed(format!(
                "window_days must be <= {}",
                analysis::MAX_WINDOW_DAYS
            )));
        }

        if self.min_paired_observations < analysis::MIN_PAIRED_OBSERVATIONS_FLOOR {
            return Err(ConfigError::ValidationFailed(format!(
                "min_paired_observations must be >= {}",
                analysis::MIN_PAIRED_OBSERVATIONS_FLOOR
            )));
        }

        if u64::from(self.max_lag_days) >= u64::from(self.window_days) {
            return Err(ConfigError::ValidationFailed(
                "max_lag_days must be smaller than window_days".into(),
            ));
        }

        let SignificanceThresholds { high, medium } = self.significance;
        if !(0.0..1.0).contains(&medium) || !(0.0..1.0).contains(&high) {
            return Err(ConfigError::ValidationFailed(
                "significance thresholds must be within [0, 1)".into(),
            ));
        }
        if medium >= high {
            return Err(ConfigError::ValidationFailed(
                "medium significance threshold must be below the high threshold".into(),
            ));
        }

        if self.confidence.correlation_weight < 0.0 || self.confidence.sample_points < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "confidence weights must be >= 0".into(),
            ));
        }

        if self.max_patterns_per_run == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_patterns_per_run must be > 0".into(),
            ));
        }

        Ok(())
    }
}

fn env_override<T: FromStr>(variable: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(variable) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Parse { variable, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_policy_lookup() {
        let policies = ReductionPolicies::standard();
        assert_eq!(
            policies.policy_for(signals::BODY_WEIGHT_KG),
            Some(ReductionPolicy::LastWrite)
        );
        assert_eq!(
            policies.policy_for(signals::SLEEP_QUALITY),
            Some(ReductionPolicy::Mean)
        );
        assert_eq!(
            policies.policy_for("fitness_test.vo2max"),
            Some(ReductionPolicy::LastWrite)
        );
        assert_eq!(policies.policy_for("unknown_metric"), None);
    }

    #[test]
    fn test_classification_boundaries() {
        let thresholds = SignificanceThresholds::default();
        assert_eq!(thresholds.classify(0.51), SignificanceTier::High);
        assert_eq!(thresholds.classify(-0.51), SignificanceTier::High);
        assert_eq!(thresholds.classify(0.5), SignificanceTier::Medium);
        assert_eq!(thresholds.classify(0.31), SignificanceTier::Medium);
        assert_eq!(thresholds.classify(0.3), SignificanceTier::Low);
        assert_eq!(thresholds.classify(0.0), SignificanceTier::Low);
    }

    #[test]
    fn test_confidence_curve_documented_points() {
        let curve = ConfidenceCurve::default();
        assert!((curve.score(1.0, 30) - 100.0).abs() < 1e-9);
        assert!((curve.score(0.5, 15) - 50.0).abs() < 1e-9);
        assert!((curve.score(0.0, 0)).abs() < 1e-9);
        assert!((curve.score(-1.0, 300) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = EngineConfig::default();
        config.significance.medium = 0.6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_window_rejected() {
        let mut config = EngineConfig {
            window_days: u32::MAX,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));

        config.window_days = analysis::MAX_WINDOW_DAYS;
        assert!(config.validate().is_ok());
    }
}
