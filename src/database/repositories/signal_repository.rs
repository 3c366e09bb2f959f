// ABOUTME: Signal read model assembled from journal entries and fitness tests
// ABOUTME: Extracts finite numeric samples for a user's analysis window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{FitnessTestRepository, JournalRepository, SignalRepository};
use crate::database::Database;
use async_trait::async_trait;
use cadence_core::errors::DatabaseError;
use cadence_core::models::Signal;
use cadence_intelligence::SignalExtractor;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

#[async_trait]
impl SignalRepository for Database {
    async fn list_signals(
        &self,
        user_id: Uuid,
        variables: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Signal>, DatabaseError> {
        let entries = self.list_entries(user_id, start, end).await?;
        let tests = self.list_tests(user_id, start, end).await?;

        let mut signals: Vec<Signal> = entries
            .iter()
            .flat_map(SignalExtractor::from_journal_entry)
            .chain(tests.iter().flat_map(SignalExtractor::from_fitness_test))
            .filter(|signal| {
                variables.is_empty() || variables.iter().any(|v| v == signal.variable())
            })
            .collect();
        signals.sort_by_key(Signal::recorded_at);

        debug!(
            user.id = %user_id,
            entries = entries.len(),
            tests = tests.len(),
            signals = signals.len(),
            "Signals extracted"
        );
        Ok(signals)
    }
}
