// ABOUTME: SQLite implementation of JournalRepository
// ABOUTME: Stores metric blocks as JSON columns and ratings as range-checked integers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{query_error, JournalRepository};
use crate::database::mappers::{encode_json, format_timestamp, JournalEntryRow};
use crate::database::Database;
use async_trait::async_trait;
use cadence_core::errors::DatabaseError;
use cadence_core::models::{JournalEntry, Rating};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteArguments;
use sqlx::query::Query;
use sqlx::Sqlite;
use uuid::Uuid;

const SELECT_COLUMNS: &str = "SELECT id, user_id, recorded_at, workout, nutrition, biometrics, \
     sleep_hours, sleep_quality, mood, energy, motivation, stress, soreness, notes, tags, \
     created_at, updated_at FROM journal_entries";

fn rating_column(rating: Option<Rating>) -> Option<i64> {
    rating.map(|r| i64::from(r.value()))
}

/// Binds every mutable column in table order, after `id` and `user_id`
fn bind_entry<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    entry: &JournalEntry,
) -> Result<Query<'q, Sqlite, SqliteArguments<'q>>, DatabaseError> {
    let sleep = entry.sleep.as_ref();
    Ok(query
        .bind(format_timestamp(entry.recorded_at))
        .bind(encode_json(entry.workout.as_ref())?)
        .bind(encode_json(entry.nutrition.as_ref())?)
        .bind(encode_json(entry.biometrics.as_ref())?)
        .bind(sleep.and_then(|s| s.hours))
        .bind(rating_column(sleep.and_then(|s| s.quality)))
        .bind(rating_column(entry.subjective.mood))
        .bind(rating_column(entry.subjective.energy))
        .bind(rating_column(entry.subjective.motivation))
        .bind(rating_column(entry.subjective.stress))
        .bind(rating_column(entry.subjective.soreness))
        .bind(entry.notes.clone())
        .bind(serde_json::to_string(&entry.tags)?)
        .bind(format_timestamp(entry.updated_at)))
}

#[async_trait]
impl JournalRepository for Database {
    async fn insert_entry(&self, entry: &JournalEntry) -> Result<(), DatabaseError> {
        let query = sqlx::query(
            r"
            INSERT INTO journal_entries (
                id, user_id, recorded_at, workout, nutrition, biometrics, sleep_hours,
                sleep_quality, mood, energy, motivation, stress, soreness, notes, tags,
                updated_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string());

        bind_entry(query, entry)?
            .bind(format_timestamp(entry.created_at))
            .execute(self.pool())
            .await
            .map_err(|e| query_error("insert journal entry", &e))?;

        Ok(())
    }

    async fn update_entry(&self, entry: &JournalEntry) -> Result<(), DatabaseError> {
        let query = sqlx::query(
            r"
            UPDATE journal_entries SET
                recorded_at = ?3, workout = ?4, nutrition = ?5, biometrics = ?6,
                sleep_hours = ?7, sleep_quality = ?8, mood = ?9, energy = ?10,
                motivation = ?11, stress = ?12, soreness = ?13, notes = ?14, tags = ?15,
                updated_at = ?16
            WHERE id = ?1 AND user_id = ?2
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string());

        let result = bind_entry(query, entry)?
            .execute(self.pool())
            .await
            .map_err(|e| query_error("update journal entry", &e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound {
                entity_type: "JournalEntry",
                entity_id: entry.id.to_string(),
            });
        }
        Ok(())
    }

    async fn get_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> Result<JournalEntry, DatabaseError> {
        let row: Option<JournalEntryRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ? AND user_id = ?"))
                .bind(entry_id.to_string())
                .bind(user_id.to_string())
                .fetch_optional(self.pool())
                .await
                .map_err(|e| query_error("get journal entry", &e))?;

        row.ok_or_else(|| DatabaseError::NotFound {
            entity_type: "JournalEntry",
            entity_id: entry_id.to_string(),
        })?
        .try_into()
    }

    async fn list_entries(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>, DatabaseError> {
        let rows: Vec<JournalEntryRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE user_id = ? AND recorded_at >= ? AND recorded_at < ? \
             ORDER BY recorded_at ASC, id ASC"
        ))
        .bind(user_id.to_string())
        .bind(format_timestamp(start))
        .bind(format_timestamp(end))
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_error("list journal entries", &e))?;

        rows.into_iter().map(JournalEntry::try_from).collect()
    }
}
