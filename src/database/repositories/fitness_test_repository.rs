// ABOUTME: SQLite implementation of FitnessTestRepository
// ABOUTME: Append-only test storage with protocol and secondary results as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{query_error, FitnessTestRepository};
use crate::database::mappers::{format_timestamp, FitnessTestRow};
use crate::database::Database;
use async_trait::async_trait;
use cadence_core::errors::DatabaseError;
use cadence_core::models::FitnessTest;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
impl FitnessTestRepository for Database {
    async fn insert_test(&self, test: &FitnessTest) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            INSERT INTO fitness_tests (
                id, user_id, test_type, protocol, primary_metric, primary_value,
                primary_unit, secondary_results, performed_at, notes
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(test.id.to_string())
        .bind(test.user_id.to_string())
        .bind(test.test_type.as_str())
        .bind(serde_json::to_string(&test.protocol)?)
        .bind(&test.primary_result.metric)
        .bind(test.primary_result.value)
        .bind(&test.primary_result.unit)
        .bind(serde_json::to_string(&test.secondary_results)?)
        .bind(format_timestamp(test.performed_at))
        .bind(test.notes.as_deref())
        .execute(self.pool())
        .await
        .map_err(|e| query_error("insert fitness test", &e))?;

        Ok(())
    }

    async fn list_tests(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FitnessTest>, DatabaseError> {
        let rows: Vec<FitnessTestRow> = sqlx::query_as(
            r"
            SELECT id, user_id, test_type, protocol, primary_metric, primary_value,
                   primary_unit, secondary_results, performed_at, notes
            FROM fitness_tests
            WHERE user_id = ? AND performed_at >= ? AND performed_at < ?
            ORDER BY performed_at ASC, id ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(format_timestamp(start))
        .bind(format_timestamp(end))
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_error("list fitness tests", &e))?;

        rows.into_iter().map(FitnessTest::try_from).collect()
    }
}
