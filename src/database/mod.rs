// ABOUTME: SQLite persistence for journal entries, fitness tests, goals, and pattern analyses
// ABOUTME: Owns the connection pool and schema; repositories are implemented on Database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! `Database` wraps an sqlx `SQLite` pool. Rows are mapped into domain types in
//! [`mappers`] and nowhere else; the repository traits in [`repositories`] are the
//! boundary the analysis service depends on.

/// Row types and row-to-domain mapping
pub mod mappers;
/// Repository traits and their `SQLite` implementations
pub mod repositories;
/// Transaction guard for atomic batches
pub mod transactions;

pub use cadence_core::errors::DatabaseError;
pub use repositories::{
    FitnessTestRepository, GoalRepository, JournalRepository, PatternRepository,
    SignalRepository, TrainingStore,
};
pub use transactions::TransactionGuard;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Instant;
use tokio::fs;
use tracing::{debug, info};

use crate::logging::AppLogger;

/// Database manager for training data and derived analyses
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `database_url` and run migrations
    ///
    /// `sqlite::memory:` databases use a single long-lived connection so every query
    /// sees the same in-memory schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        let database = Self::connect(database_url).await?;
        database.migrate().await?;
        Ok(database)
    }

    /// Connect to `database_url` without running migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the connection fails
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(database_url)
                .await?
        } else {
            let options = SqliteConnectOptions::from_str(database_url)?
                .create_if_missing(true)
                .foreign_keys(true);
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await?;
                }
            }
            SqlitePoolOptions::new().connect_with(options).await?
        };

        debug!(database.url = %database_url, "Database pool created");
        Ok(Self { pool })
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create all tables and indexes
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> Result<()> {
        let started = Instant::now();

        self.migrate_journal().await?;
        self.migrate_fitness_tests().await?;
        self.migrate_goals().await?;
        self.migrate_patterns().await?;

        AppLogger::log_database_operation(
            "migrate",
            "*",
            true,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        info!("Database migrations complete");
        Ok(())
    }

    async fn migrate_journal(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS journal_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                recorded_at TEXT NOT NULL,
                workout TEXT,
                nutrition TEXT,
                biometrics TEXT,
                sleep_hours REAL,
                sleep_quality INTEGER CHECK (sleep_quality BETWEEN 1 AND 10),
                mood INTEGER CHECK (mood BETWEEN 1 AND 10),
                energy INTEGER CHECK (energy BETWEEN 1 AND 10),
                motivation INTEGER CHECK (motivation BETWEEN 1 AND 10),
                stress INTEGER CHECK (stress BETWEEN 1 AND 10),
                soreness INTEGER CHECK (soreness BETWEEN 1 AND 10),
                notes TEXT,
                tags TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_journal_entries_user_recorded ON journal_entries(user_id, recorded_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_fitness_tests(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS fitness_tests (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                test_type TEXT NOT NULL,
                protocol TEXT NOT NULL,
                primary_metric TEXT NOT NULL,
                primary_value REAL NOT NULL,
                primary_unit TEXT NOT NULL,
                secondary_results TEXT NOT NULL DEFAULT '[]',
                performed_at TEXT NOT NULL,
                notes TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_fitness_tests_user_performed ON fitness_tests(user_id, performed_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_goals(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS goals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                metric TEXT NOT NULL,
                unit TEXT,
                target_value REAL NOT NULL CHECK (target_value <> 0),
                current_value REAL NOT NULL,
                created_at TEXT NOT NULL,
                deadline TEXT NOT NULL,
                success_probability REAL NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS goal_progress (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                goal_id TEXT NOT NULL REFERENCES goals(id) ON DELETE CASCADE,
                recorded_at TEXT NOT NULL,
                value REAL NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_goals_user ON goals(user_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_goal_progress_goal ON goal_progress(goal_id, recorded_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_patterns(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS pattern_analyses (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                run_id TEXT NOT NULL,
                rank INTEGER NOT NULL,
                first_variable TEXT NOT NULL,
                second_variable TEXT NOT NULL,
                correlation REAL NOT NULL CHECK (correlation BETWEEN -1 AND 1),
                confidence REAL NOT NULL CHECK (confidence BETWEEN 0 AND 100),
                significance TEXT NOT NULL CHECK (significance IN ('medium', 'high')),
                lag_days INTEGER NOT NULL,
                sample_size INTEGER NOT NULL,
                insight TEXT NOT NULL,
                recommendation TEXT NOT NULL,
                timeframe_start TEXT NOT NULL,
                timeframe_end TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_pattern_analyses_user_created ON pattern_analyses(user_id, created_at)",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_pattern_analyses_run ON pattern_analyses(run_id, rank)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
