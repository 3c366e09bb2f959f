// ABOUTME: Repository traits forming the store boundary of the analysis service
// ABOUTME: Each trait is implemented on Database; TrainingStore bundles them all
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Repository pattern for training data
//!
//! The analysis service depends on [`TrainingStore`] rather than on `Database`, so
//! tests can substitute a store that fails on demand.

mod fitness_test_repository;
mod goal_repository;
mod journal_repository;
mod pattern_repository;
mod signal_repository;

use async_trait::async_trait;
use cadence_core::errors::DatabaseError;
use cadence_core::models::{
    FitnessTest, Goal, GoalProgressPoint, GoalUpdate, JournalEntry, PatternAnalysis, Signal,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Journal entry storage
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Store a new entry
    async fn insert_entry(&self, entry: &JournalEntry) -> Result<(), DatabaseError>;

    /// Overwrite an existing entry owned by `entry.user_id`
    async fn update_entry(&self, entry: &JournalEntry) -> Result<(), DatabaseError>;

    /// Fetch one entry owned by `user_id`
    async fn get_entry(&self, user_id: Uuid, entry_id: Uuid)
        -> Result<JournalEntry, DatabaseError>;

    /// Entries recorded in `[start, end)`, oldest first
    async fn list_entries(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>, DatabaseError>;
}

/// Fitness test storage (append-only)
#[async_trait]
pub trait FitnessTestRepository: Send + Sync {
    /// Append a test
    async fn insert_test(&self, test: &FitnessTest) -> Result<(), DatabaseError>;

    /// Tests performed in `[start, end)`, oldest first
    async fn list_tests(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FitnessTest>, DatabaseError>;
}

/// Signal read model over journal entries and fitness tests
#[async_trait]
pub trait SignalRepository: Send + Sync {
    /// Signals recorded in `[start, end)` for the named variables (all when empty)
    async fn list_signals(
        &self,
        user_id: Uuid,
        variables: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Signal>, DatabaseError>;
}

/// Goal and goal history storage
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Store a new goal
    async fn create_goal(&self, goal: &Goal) -> Result<(), DatabaseError>;

    /// Fetch a goal
    async fn get_goal(&self, goal_id: Uuid) -> Result<Goal, DatabaseError>;

    /// Value history of a goal, oldest first
    async fn list_goal_history(&self, goal_id: Uuid)
        -> Result<Vec<GoalProgressPoint>, DatabaseError>;

    /// Append a history sample
    async fn append_goal_progress(
        &self,
        goal_id: Uuid,
        point: GoalProgressPoint,
    ) -> Result<(), DatabaseError>;

    /// Write back derived fields
    async fn update_goal(&self, goal_id: Uuid, update: GoalUpdate) -> Result<(), DatabaseError>;
}

/// Pattern analysis storage (append-only)
#[async_trait]
pub trait PatternRepository: Send + Sync {
    /// Append all rows of one run in a single transaction; on failure nothing is kept
    async fn append_pattern_analyses(
        &self,
        user_id: Uuid,
        patterns: &[PatternAnalysis],
    ) -> Result<usize, DatabaseError>;

    /// Rows of the user's most recent run, in rank order
    async fn list_latest_patterns(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PatternAnalysis>, DatabaseError>;
}

/// Everything the analysis service reads and writes
pub trait TrainingStore:
    JournalRepository + FitnessTestRepository + SignalRepository + GoalRepository + PatternRepository
{
}

impl<T> TrainingStore for T where
    T: JournalRepository
        + FitnessTestRepository
        + SignalRepository
        + GoalRepository
        + PatternRepository
{
}

fn query_error(operation: &str, error: &sqlx::Error) -> DatabaseError {
    DatabaseError::QueryError {
        context: format!("{operation}: {error}"),
    }
}
