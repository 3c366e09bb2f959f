// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, quiet logging, and journal entry builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `cadence`

use anyhow::Result;
use cadence::database::Database;
use cadence::models::{JournalEntry, Rating, SleepMetrics, SubjectiveMetrics, WorkoutMetrics};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::env;
use std::sync::Once;
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Fixed evening instant used as "now" by scenario tests
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 10, 18, 0, 0).unwrap()
}

/// Morning of the day `days_ago` days before `now`
pub fn morning_of(now: DateTime<Utc>, days_ago: usize) -> DateTime<Utc> {
    let day = now.date_naive() - Duration::days(i64::try_from(days_ago).unwrap());
    day.and_hms_opt(7, 0, 0).unwrap().and_utc()
}

/// Rating that must be within 1-10
pub fn rating(value: f64) -> Option<Rating> {
    Some(Rating::new(value as u8).unwrap())
}

/// Entry with only sleep quality and workout intensity
pub fn sleep_and_intensity_entry(
    user_id: Uuid,
    recorded_at: DateTime<Utc>,
    sleep_quality: f64,
    intensity: f64,
) -> JournalEntry {
    JournalEntry::new(user_id, recorded_at)
        .with_sleep(SleepMetrics {
            hours: None,
            quality: rating(sleep_quality),
        })
        .with_workout(WorkoutMetrics {
            intensity: Some(intensity),
            ..WorkoutMetrics::default()
        })
}

/// Entry with only sleep quality and energy
pub fn sleep_and_energy_entry(
    user_id: Uuid,
    recorded_at: DateTime<Utc>,
    sleep_quality: f64,
    energy: f64,
) -> JournalEntry {
    JournalEntry::new(user_id, recorded_at)
        .with_sleep(SleepMetrics {
            hours: None,
            quality: rating(sleep_quality),
        })
        .with_subjective(SubjectiveMetrics {
            energy: rating(energy),
            ..SubjectiveMetrics::default()
        })
}

/// Sleep quality of the reference scenario, oldest day first
pub const SCENARIO_SLEEP: [f64; 10] = [5.0, 6.0, 7.0, 8.0, 9.0, 5.0, 6.0, 7.0, 8.0, 9.0];

/// Workout intensity of the reference scenario, oldest day first
pub const SCENARIO_INTENSITY: [f64; 10] =
    [50.0, 55.0, 60.0, 70.0, 80.0, 50.0, 55.0, 60.0, 70.0, 80.0];

/// Journal entries for the last `days` days of the reference scenario ending on `now`
pub fn scenario_entries(user_id: Uuid, now: DateTime<Utc>, days: usize) -> Vec<JournalEntry> {
    let skip = SCENARIO_SLEEP.len() - days;
    SCENARIO_SLEEP
        .iter()
        .zip(SCENARIO_INTENSITY)
        .enumerate()
        .skip(skip)
        .map(|(index, (sleep, intensity))| {
            let days_ago = SCENARIO_SLEEP.len() - 1 - index;
            sleep_and_intensity_entry(user_id, morning_of(now, days_ago), *sleep, intensity)
        })
        .collect()
}

/// Number of stored pattern rows across all users
pub async fn count_pattern_rows(database: &Database) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pattern_analyses")
        .fetch_one(database.pool())
        .await?;
    Ok(count)
}
