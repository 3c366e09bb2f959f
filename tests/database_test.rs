// ABOUTME: Integration tests for SQLite storage and the row mapping boundary
// ABOUTME: Covers on-disk persistence, atomic pattern batches, and rejection of corrupt rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use cadence::database::{Database, GoalRepository, JournalRepository, PatternRepository};
use cadence::errors::{AppError, DatabaseError, ErrorCode};
use cadence::models::{PatternAnalysis, SignificanceTier, Timeframe};
use chrono::{Duration, NaiveDate};
use common::{
    count_pattern_rows, create_test_database, init_test_logging, reference_now, scenario_entries,
};
use tempfile::TempDir;
use uuid::Uuid;

fn pattern(user_id: Uuid, run_id: Uuid, confidence: f64) -> PatternAnalysis {
    PatternAnalysis {
        id: Uuid::new_v4(),
        user_id,
        run_id,
        first_variable: "sleep_quality".into(),
        second_variable: "workout_intensity".into(),
        correlation: 0.82,
        confidence,
        significance: SignificanceTier::High,
        lag_days: 0,
        sample_size: 14,
        insight: "Better sleep quality is strongly associated with higher workout intensity."
            .into(),
        recommendation: "Protect your sleep before hard sessions.".into(),
        timeframe: Timeframe {
            start: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
        },
        created_at: reference_now(),
    }
}

#[tokio::test]
async fn test_on_disk_database_persists_across_connections() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("nested/cadence.db").display());
    let user_id = Uuid::new_v4();
    let entries = scenario_entries(user_id, reference_now(), 3);

    {
        let database = Database::new(&url).await.unwrap();
        for entry in &entries {
            database.insert_entry(entry).await.unwrap();
        }
    }

    let reopened = Database::new(&url).await.unwrap();
    let stored = reopened
        .list_entries(
            user_id,
            reference_now() - Duration::days(7),
            reference_now() + Duration::days(1),
        )
        .await
        .unwrap();
    assert_eq!(stored, entries);
}

#[tokio::test]
async fn test_pattern_batch_is_all_or_nothing() {
    let database = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();
    let run_id = Uuid::new_v4();
    let batch = vec![pattern(user_id, run_id, 88.0), pattern(user_id, run_id, 150.0)];

    let result = database.append_pattern_analyses(user_id, &batch).await;

    assert!(result.is_err());
    assert_eq!(count_pattern_rows(&database).await.unwrap(), 0);
    assert!(database.list_latest_patterns(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pattern_batch_round_trips_in_rank_order() {
    let database = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();
    let run_id = Uuid::new_v4();
    let mut second = pattern(user_id, run_id, 61.0);
    second.first_variable = "stress".into();
    second.second_variable = "sleep_quality".into();
    second.correlation = -0.41;
    second.significance = SignificanceTier::Medium;
    second.lag_days = 2;
    let batch = vec![pattern(user_id, run_id, 88.0), second];

    let written = database
        .append_pattern_analyses(user_id, &batch)
        .await
        .unwrap();

    assert_eq!(written, 2);
    assert_eq!(database.list_latest_patterns(user_id).await.unwrap(), batch);
}

#[tokio::test]
async fn test_pattern_batch_rejects_other_users_rows() {
    let database = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();
    let foreign = pattern(Uuid::new_v4(), Uuid::new_v4(), 70.0);
    let foreign_id = foreign.id.to_string();
    let batch = vec![pattern(user_id, foreign.run_id, 80.0), foreign];

    let error = database
        .append_pattern_analyses(user_id, &batch)
        .await
        .unwrap_err();
    assert!(matches!(
        &error,
        DatabaseError::NotOwned { entity_id, .. } if *entity_id == foreign_id
    ));
    assert_eq!(AppError::from(error).code, ErrorCode::ResourceNotOwned);
    assert_eq!(count_pattern_rows(&database).await.unwrap(), 0);
}

#[tokio::test]
async fn test_corrupt_rows_rejected_at_mapping_boundary() {
    let database = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();
    let entry_id = Uuid::new_v4();

    sqlx::query(
        r"
        INSERT INTO journal_entries (id, user_id, recorded_at, created_at, updated_at)
        VALUES (?, ?, 'last tuesday', '2025-07-10T07:00:00.000000Z', '2025-07-10T07:00:00.000000Z')
        ",
    )
    .bind(entry_id.to_string())
    .bind(user_id.to_string())
    .execute(database.pool())
    .await
    .unwrap();

    let result = database.get_entry(user_id, entry_id).await;
    assert!(matches!(
        result,
        Err(DatabaseError::InvalidRow {
            entity_type: "JournalEntry",
            ..
        })
    ));
}

#[tokio::test]
async fn test_rating_columns_enforce_scale() {
    let database = create_test_database().await.unwrap();

    let result = sqlx::query(
        r"
        INSERT INTO journal_entries (id, user_id, recorded_at, mood, created_at, updated_at)
        VALUES (?, ?, '2025-07-10T07:00:00.000000Z', 11,
                '2025-07-10T07:00:00.000000Z', '2025-07-10T07:00:00.000000Z')
        ",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(Uuid::new_v4().to_string())
    .execute(database.pool())
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_missing_goal_not_found() {
    let database = create_test_database().await.unwrap();
    let goal_id = Uuid::new_v4();

    assert!(matches!(
        database.get_goal(goal_id).await,
        Err(DatabaseError::NotFound {
            entity_type: "Goal",
            ..
        })
    ));
    assert!(database.list_goal_history(goal_id).await.unwrap().is_empty());
}
