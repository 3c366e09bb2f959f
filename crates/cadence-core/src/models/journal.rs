// ABOUTME: Training journal entry model with objective metrics and bounded subjective ratings
// ABOUTME: Ratings are validated on construction and deserialization to the 1-10 scale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::ratings::{MAX_RATING, MIN_RATING};
use crate::errors::AnalysisError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subjective rating on the 1-10 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Create a rating, returning `None` outside 1-10
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= MIN_RATING && value <= MAX_RATING {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Validate a stored or submitted rating for the named field
    ///
    /// # Errors
    ///
    /// Returns `RatingOutOfRange` if the value is not within 1-10
    pub fn for_field(field: &'static str, value: i64) -> Result<Self, AnalysisError> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(AnalysisError::RatingOutOfRange { field, value })
    }

    /// Numeric value of the rating
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = AnalysisError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::for_field("rating", i64::from(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Objective workout metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutMetrics {
    /// Session length in minutes
    pub duration_minutes: Option<f64>,
    /// Session intensity (0-100)
    pub intensity: Option<f64>,
    /// Total lifted volume in kilograms
    pub volume_kg: Option<f64>,
    /// Rate of perceived exertion
    pub rpe: Option<f64>,
    /// Reps in reserve
    pub rir: Option<f64>,
}

/// Daily nutrition metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionMetrics {
    /// Calories consumed
    pub calories: Option<f64>,
    /// Protein in grams
    pub protein_grams: Option<f64>,
    /// Carbohydrates in grams
    pub carbs_grams: Option<f64>,
    /// Fat in grams
    pub fat_grams: Option<f64>,
    /// Water intake in liters
    pub hydration_liters: Option<f64>,
}

/// Body and cardiovascular measurements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiometricMetrics {
    /// Body weight in kilograms
    pub body_weight_kg: Option<f64>,
    /// Body fat percentage
    pub body_fat_percent: Option<f64>,
    /// Resting heart rate in bpm
    pub resting_heart_rate: Option<f64>,
    /// Heart rate variability in milliseconds
    pub hrv_ms: Option<f64>,
}

/// Sleep metrics for the night before the entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepMetrics {
    /// Hours slept
    pub hours: Option<f64>,
    /// Subjective sleep quality
    pub quality: Option<Rating>,
}

/// Subjective wellbeing ratings, each bounded to 1-10
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectiveMetrics {
    /// Mood
    pub mood: Option<Rating>,
    /// Energy
    pub energy: Option<Rating>,
    /// Motivation
    pub motivation: Option<Rating>,
    /// Stress
    pub stress: Option<Rating>,
    /// Muscle soreness
    pub soreness: Option<Rating>,
}

/// A user's journal entry for one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Entry identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// When the recorded day/session happened
    pub recorded_at: DateTime<Utc>,
    /// Workout block
    pub workout: Option<WorkoutMetrics>,
    /// Nutrition block
    pub nutrition: Option<NutritionMetrics>,
    /// Biometrics block
    pub biometrics: Option<BiometricMetrics>,
    /// Sleep block
    pub sleep: Option<SleepMetrics>,
    /// Subjective ratings
    pub subjective: SubjectiveMetrics,
    /// Free-text notes
    pub notes: Option<String>,
    /// User tags
    pub tags: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last user edit
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Create an empty entry for `user_id` recorded at `recorded_at`
    #[must_use]
    pub fn new(user_id: Uuid, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            recorded_at,
            workout: None,
            nutrition: None,
            biometrics: None,
            sleep: None,
            subjective: SubjectiveMetrics::default(),
            notes: None,
            tags: Vec::new(),
            created_at: recorded_at,
            updated_at: recorded_at,
        }
    }

    /// Attach workout metrics
    #[must_use]
    pub fn with_workout(mut self, workout: WorkoutMetrics) -> Self {
        self.workout = Some(workout);
        self
    }

    /// Attach nutrition metrics
    #[must_use]
    pub fn with_nutrition(mut self, nutrition: NutritionMetrics) -> Self {
        self.nutrition = Some(nutrition);
        self
    }

    /// Attach biometrics
    #[must_use]
    pub fn with_biometrics(mut self, biometrics: BiometricMetrics) -> Self {
        self.biometrics = Some(biometrics);
        self
    }

    /// Attach sleep metrics
    #[must_use]
    pub fn with_sleep(mut self, sleep: SleepMetrics) -> Self {
        self.sleep = Some(sleep);
        self
    }

    /// Attach subjective ratings
    #[must_use]
    pub const fn with_subjective(mut self, subjective: SubjectiveMetrics) -> Self {
        self.subjective = subjective;
        self
    }
}
