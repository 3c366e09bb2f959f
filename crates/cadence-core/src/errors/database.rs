// ABOUTME: Structured error types for database operations
// ABOUTME: Provides domain-specific errors with context for better error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Database operation errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Entity lookup returned no row
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Entity kind (e.g. "Goal")
        entity_type: &'static str,
        /// Identifier that was looked up
        entity_id: String,
    },

    /// Entity belongs to a different user than the caller named
    #[error("{entity_type} {entity_id} belongs to another user")]
    NotOwned {
        /// Entity kind
        entity_type: &'static str,
        /// Identifier of the foreign entity
        entity_id: String,
    },

    /// Query execution failed
    #[error("Query failed: {context}")]
    QueryError {
        /// Failure details
        context: String,
    },

    /// A stored row could not be mapped into its domain type
    #[error("Invalid {entity_type} row: {reason}")]
    InvalidRow {
        /// Entity kind
        entity_type: &'static str,
        /// Why mapping failed
        reason: String,
    },

    /// Transaction could not be committed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// JSON column (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Driver-level error
    #[cfg(feature = "database-errors")]
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Create an invalid row error
    #[must_use]
    pub fn invalid_row(entity_type: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRow {
            entity_type,
            reason: reason.into(),
        }
    }
}
