// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Signal variable names, analysis thresholds, and goal projection bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large list.
//! Engine defaults live here so configuration and tests agree on the same numbers.

/// Canonical signal variable names extracted from journal entries and fitness tests
pub mod signals {
    /// Subjective sleep quality rating (1-10)
    pub const SLEEP_QUALITY: &str = "sleep_quality";
    /// Hours slept
    pub const SLEEP_HOURS: &str = "sleep_hours";
    /// Subjective mood rating (1-10)
    pub const MOOD: &str = "mood";
    /// Subjective energy rating (1-10)
    pub const ENERGY: &str = "energy";
    /// Subjective motivation rating (1-10)
    pub const MOTIVATION: &str = "motivation";
    /// Subjective stress rating (1-10)
    pub const STRESS: &str = "stress";
    /// Subjective soreness rating (1-10)
    pub const SORENESS: &str = "soreness";
    /// Workout intensity (0-100)
    pub const WORKOUT_INTENSITY: &str = "workout_intensity";
    /// Workout duration in minutes
    pub const WORKOUT_DURATION_MINUTES: &str = "workout_duration_minutes";
    /// Total lifted volume in kilograms
    pub const WORKOUT_VOLUME_KG: &str = "workout_volume_kg";
    /// Rate of perceived exertion
    pub const RPE: &str = "rpe";
    /// Reps in reserve
    pub const RIR: &str = "rir";
    /// Calories consumed
    pub const CALORIES: &str = "calories";
    /// Protein in grams
    pub const PROTEIN_GRAMS: &str = "protein_grams";
    /// Carbohydrates in grams
    pub const CARBS_GRAMS: &str = "carbs_grams";
    /// Fat in grams
    pub const FAT_GRAMS: &str = "fat_grams";
    /// Water intake in liters
    pub const HYDRATION_LITERS: &str = "hydration_liters";
    /// Body weight in kilograms
    pub const BODY_WEIGHT_KG: &str = "body_weight_kg";
    /// Body fat percentage
    pub const BODY_FAT_PERCENT: &str = "body_fat_percent";
    /// Resting heart rate in bpm
    pub const RESTING_HEART_RATE: &str = "resting_heart_rate";
    /// Heart rate variability in milliseconds
    pub const HRV_MS: &str = "hrv_ms";

    /// Prefix for variables extracted from fitness test results
    pub const FITNESS_TEST_PREFIX: &str = "fitness_test.";

    /// Rate-like variables, reduced by mean when sampled several times a day
    pub const RATE_LIKE: &[&str] = &[
        SLEEP_QUALITY,
        SLEEP_HOURS,
        MOOD,
        ENERGY,
        MOTIVATION,
        STRESS,
        SORENESS,
        WORKOUT_INTENSITY,
        WORKOUT_DURATION_MINUTES,
        WORKOUT_VOLUME_KG,
        RPE,
        RIR,
        CALORIES,
        PROTEIN_GRAMS,
        CARBS_GRAMS,
        FAT_GRAMS,
        HYDRATION_LITERS,
        RESTING_HEART_RATE,
        HRV_MS,
    ];

    /// State-like variables, reduced by last write
    pub const STATE_LIKE: &[&str] = &[BODY_WEIGHT_KG, BODY_FAT_PERCENT];
}

/// Correlation engine defaults
pub mod analysis {
    /// Default history window in days
    pub const DEFAULT_WINDOW_DAYS: u32 = 90;
    /// Longest history window the configuration accepts (about five years)
    pub const MAX_WINDOW_DAYS: u32 = 1_830;
    /// Minimum paired daily observations before a pair is analyzed
    pub const MIN_PAIRED_OBSERVATIONS: usize = 10;
    /// Smallest minimum the configuration accepts
    pub const MIN_PAIRED_OBSERVATIONS_FLOOR: usize = 3;
    /// Largest lag (days) evaluated for delayed effects
    pub const DEFAULT_MAX_LAG_DAYS: u32 = 3;
    /// |r| above which a relationship is high significance
    pub const HIGH_SIGNIFICANCE_THRESHOLD: f64 = 0.5;
    /// |r| above which a relationship is medium significance
    pub const MEDIUM_SIGNIFICANCE_THRESHOLD: f64 = 0.3;
    /// Share of the confidence score driven by |r|
    pub const CONFIDENCE_CORRELATION_WEIGHT: f64 = 0.8;
    /// Points of confidence awarded for a saturated sample size
    pub const CONFIDENCE_SAMPLE_POINTS: f64 = 20.0;
    /// Sample size at which the sample component saturates
    pub const CONFIDENCE_SATURATION_SAMPLES: usize = 30;
    /// Maximum confidence score
    pub const MAX_CONFIDENCE: f64 = 100.0;
    /// Default cap on patterns kept per run
    pub const DEFAULT_MAX_PATTERNS_PER_RUN: usize = 20;
}

/// Goal projection bounds (pace heuristic, not a calibrated model)
pub mod goals {
    /// Probability when exactly on pace
    pub const BASELINE_PROBABILITY: f64 = 70.0;
    /// Highest probability the projector reports
    pub const MAX_PROBABILITY: f64 = 95.0;
    /// Lowest probability the projector reports
    pub const MIN_PROBABILITY: f64 = 10.0;
    /// Probability points per unit of progress lead or lag
    pub const PACE_SCALE: f64 = 100.0;
}

/// Subjective rating scale
pub mod ratings {
    /// Lowest valid rating
    pub const MIN_RATING: u8 = 1;
    /// Highest valid rating
    pub const MAX_RATING: u8 = 10;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Library / service name
    pub const CADENCE: &str = "cadence";
    /// CLI binary name
    pub const CADENCE_CLI: &str = "cadence-cli";
}
