// ABOUTME: SQLite implementation of PatternRepository
// ABOUTME: Appends each run's rows in one transaction and reads back the latest run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{query_error, PatternRepository};
use crate::database::mappers::{format_date, format_timestamp, PatternAnalysisRow};
use crate::database::{Database, TransactionGuard};
use async_trait::async_trait;
use cadence_core::errors::DatabaseError;
use cadence_core::models::PatternAnalysis;
use std::time::Instant;
use uuid::Uuid;

use crate::logging::AppLogger;

#[async_trait]
impl PatternRepository for Database {
    async fn append_pattern_analyses(
        &self,
        user_id: Uuid,
        patterns: &[PatternAnalysis],
    ) -> Result<usize, DatabaseError> {
        if patterns.is_empty() {
            return Ok(0);
        }
        if let Some(foreign) = patterns.iter().find(|p| p.user_id != user_id) {
            return Err(DatabaseError::NotOwned {
                entity_type: "PatternAnalysis",
                entity_id: foreign.id.to_string(),
            });
        }

        let started = Instant::now();
        let mut guard = TransactionGuard::begin(self.pool()).await?;

        for (rank, pattern) in patterns.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO pattern_analyses (
                    id, user_id, run_id, rank, first_variable, second_variable, correlation,
                    confidence, significance, lag_days, sample_size, insight, recommendation,
                    timeframe_start, timeframe_end, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(pattern.id.to_string())
            .bind(user_id.to_string())
            .bind(pattern.run_id.to_string())
            .bind(i64::try_from(rank).unwrap_or(i64::MAX))
            .bind(&pattern.first_variable)
            .bind(&pattern.second_variable)
            .bind(pattern.correlation)
            .bind(pattern.confidence)
            .bind(pattern.significance.as_str())
            .bind(i64::from(pattern.lag_days))
            .bind(i64::try_from(pattern.sample_size).unwrap_or(i64::MAX))
            .bind(&pattern.insight)
            .bind(&pattern.recommendation)
            .bind(format_date(pattern.timeframe.start))
            .bind(format_date(pattern.timeframe.end))
            .bind(format_timestamp(pattern.created_at))
            .execute(guard.executor()?)
            .await
            .map_err(|e| query_error("insert pattern analysis", &e))?;
        }

        guard.commit().await?;

        AppLogger::log_database_operation(
            "append",
            "pattern_analyses",
            true,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(patterns.len())
    }

    async fn list_latest_patterns(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PatternAnalysis>, DatabaseError> {
        let rows: Vec<PatternAnalysisRow> = sqlx::query_as(
            r"
            SELECT id, user_id, run_id, first_variable, second_variable, correlation,
                   confidence, significance, lag_days, sample_size, insight, recommendation,
                   timeframe_start, timeframe_end, created_at
            FROM pattern_analyses
            WHERE user_id = ?1 AND run_id = (
                SELECT run_id FROM pattern_analyses
                WHERE user_id = ?1
                ORDER BY created_at DESC, rowid DESC
                LIMIT 1
            )
            ORDER BY rank ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_error("list latest patterns", &e))?;

        rows.into_iter().map(PatternAnalysis::try_from).collect()
    }
}
