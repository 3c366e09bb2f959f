// ABOUTME: Tests for environment-driven configuration loading
// ABOUTME: Validates defaults, overrides, and errors that name the offending variable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use cadence::config::{DatabaseUrl, ServerConfig};
use cadence::errors::ErrorCode;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const VARIABLES: &[&str] = &[
    "DATABASE_URL",
    "CADENCE_AUTO_MIGRATE",
    "CADENCE_ANALYSIS_WINDOW_DAYS",
    "CADENCE_MIN_PAIRED_OBSERVATIONS",
    "CADENCE_MAX_LAG_DAYS",
    "CADENCE_HIGH_SIGNIFICANCE_THRESHOLD",
    "CADENCE_MEDIUM_SIGNIFICANCE_THRESHOLD",
    "CADENCE_MAX_PATTERNS_PER_RUN",
];

fn clear_environment() {
    for variable in VARIABLES {
        env::remove_var(variable);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_environment();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(
        config.database.url,
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/cadence.db")
        }
    );
    assert!(config.database.auto_migrate);
    assert_eq!(config.engine.window_days, 90);
    assert_eq!(config.engine.min_paired_observations, 10);
    assert_eq!(config.engine.max_lag_days, 3);
    assert!((config.engine.significance.high - 0.5).abs() < f64::EPSILON);
    assert!((config.engine.significance.medium - 0.3).abs() < f64::EPSILON);
    assert_eq!(config.engine.max_patterns_per_run, 20);
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_environment();
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("CADENCE_AUTO_MIGRATE", "false");
    env::set_var("CADENCE_ANALYSIS_WINDOW_DAYS", "28");
    env::set_var("CADENCE_MIN_PAIRED_OBSERVATIONS", "7");
    env::set_var("CADENCE_MAX_LAG_DAYS", "0");

    let config = ServerConfig::from_env().unwrap();
    clear_environment();

    assert!(config.database.url.is_memory());
    assert!(!config.database.auto_migrate);
    assert_eq!(config.engine.window_days, 28);
    assert_eq!(config.engine.min_paired_observations, 7);
    assert_eq!(config.engine.max_lag_days, 0);
    assert!(config.summary().contains("window_days=28"));
}

#[test]
#[serial]
fn test_unparseable_value_names_variable() {
    clear_environment();
    env::set_var("CADENCE_MAX_LAG_DAYS", "three");

    let error = ServerConfig::from_env().unwrap_err();
    clear_environment();

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains("CADENCE_MAX_LAG_DAYS"));
}

#[test]
#[serial]
fn test_inconsistent_thresholds_rejected() {
    clear_environment();
    env::set_var("CADENCE_HIGH_SIGNIFICANCE_THRESHOLD", "0.3");
    env::set_var("CADENCE_MEDIUM_SIGNIFICANCE_THRESHOLD", "0.5");

    let error = ServerConfig::from_env().unwrap_err();
    clear_environment();

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}

#[test]
#[serial]
fn test_minimum_pairs_floor_enforced() {
    clear_environment();
    env::set_var("CADENCE_MIN_PAIRED_OBSERVATIONS", "2");

    assert!(ServerConfig::from_env().is_err());
    clear_environment();
}

#[test]
#[serial]
fn test_invalid_boolean_rejected() {
    clear_environment();
    env::set_var("CADENCE_AUTO_MIGRATE", "sometimes");

    let error = ServerConfig::from_env().unwrap_err();
    clear_environment();

    assert!(error.message.contains("CADENCE_AUTO_MIGRATE"));
}

#[test]
#[serial]
fn test_oversized_window_rejected_at_load() {
    clear_environment();
    env::set_var("CADENCE_ANALYSIS_WINDOW_DAYS", "4000000000");

    let error = ServerConfig::from_env().unwrap_err();
    clear_environment();

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains("window_days"));
}
