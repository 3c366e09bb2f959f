// ABOUTME: Extracts normalized numeric signals from journal entries and fitness tests
// ABOUTME: Missing and non-finite fields are dropped, never coerced to zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cadence_core::constants::signals::{
    BODY_FAT_PERCENT, BODY_WEIGHT_KG, CALORIES, CARBS_GRAMS, ENERGY, FAT_GRAMS,
    FITNESS_TEST_PREFIX, HRV_MS, HYDRATION_LITERS, MOOD, MOTIVATION, PROTEIN_GRAMS,
    RESTING_HEART_RATE, RIR, RPE, SLEEP_HOURS, SLEEP_QUALITY, SORENESS, STRESS,
    WORKOUT_DURATION_MINUTES, WORKOUT_INTENSITY, WORKOUT_VOLUME_KG,
};
use cadence_core::models::{FitnessTest, JournalEntry, Rating, Signal};

/// Turns user records into `Signal`s
pub struct SignalExtractor;

impl SignalExtractor {
    /// Every present, finite field of the entry as a signal stamped `recorded_at`
    #[must_use]
    pub fn from_journal_entry(entry: &JournalEntry) -> Vec<Signal> {
        let mut samples: Vec<(&'static str, Option<f64>)> = Vec::with_capacity(21);

        if let Some(workout) = &entry.workout {
            samples.extend([
                (WORKOUT_DURATION_MINUTES, workout.duration_minutes),
                (WORKOUT_INTENSITY, workout.intensity),
                (WORKOUT_VOLUME_KG, workout.volume_kg),
                (RPE, workout.rpe),
                (RIR, workout.rir),
            ]);
        }

        if let Some(nutrition) = &entry.nutrition {
            samples.extend([
                (CALORIES, nutrition.calories),
                (PROTEIN_GRAMS, nutrition.protein_grams),
                (CARBS_GRAMS, nutrition.carbs_grams),
                (FAT_GRAMS, nutrition.fat_grams),
                (HYDRATION_LITERS, nutrition.hydration_liters),
            ]);
        }

        if let Some(biometrics) = &entry.biometrics {
            samples.extend([
                (BODY_WEIGHT_KG, biometrics.body_weight_kg),
                (BODY_FAT_PERCENT, biometrics.body_fat_percent),
                (RESTING_HEART_RATE, biometrics.resting_heart_rate),
                (HRV_MS, biometrics.hrv_ms),
            ]);
        }

        if let Some(sleep) = &entry.sleep {
            samples.extend([
                (SLEEP_HOURS, sleep.hours),
                (SLEEP_QUALITY, sleep.quality.map(rating_value)),
            ]);
        }

        let subjective = &entry.subjective;
        samples.extend([
            (MOOD, subjective.mood.map(rating_value)),
            (ENERGY, subjective.energy.map(rating_value)),
            (MOTIVATION, subjective.motivation.map(rating_value)),
            (STRESS, subjective.stress.map(rating_value)),
            (SORENESS, subjective.soreness.map(rating_value)),
        ]);

        samples
            .into_iter()
            .filter_map(|(variable, value)| {
                value.and_then(|value| Signal::new(entry.recorded_at, variable, value))
            })
            .collect()
    }

    /// Primary and secondary results as `fitness_test.<metric>` signals
    #[must_use]
    pub fn from_fitness_test(test: &FitnessTest) -> Vec<Signal> {
        test.results()
            .filter_map(|result| {
                let variable = Self::fitness_test_variable(&result.metric)?;
                Signal::new(test.performed_at, variable, result.value)
            })
            .collect()
    }

    /// Variable name for a fitness-test metric, `None` for a blank metric
    #[must_use]
    pub fn fitness_test_variable(metric: &str) -> Option<String> {
        let normalized = metric
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_");
        (!normalized.is_empty()).then(|| format!("{FITNESS_TEST_PREFIX}{normalized}"))
    }
}

fn rating_value(rating: Rating) -> f64 {
    f64::from(rating.value())
}
