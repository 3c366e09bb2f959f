// ABOUTME: RAII transaction guard that rolls back unless explicitly committed
// ABOUTME: Used for the all-or-nothing pattern analysis batch append
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Transaction management
//!
//! ```text
//! let mut guard = TransactionGuard::begin(database.pool()).await?;
//! sqlx::query("INSERT INTO pattern_analyses ...").execute(guard.executor()?).await?;
//! guard.commit().await?;
//! ```
//!
//! Dropping the guard before `commit()` rolls the transaction back.

use cadence_core::errors::DatabaseError;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, warn};

/// Transaction that rolls back on drop unless committed
pub struct TransactionGuard<'c> {
    transaction: Option<Transaction<'c, Sqlite>>,
    committed: bool,
}

impl TransactionGuard<'static> {
    /// Begin a transaction on `pool`
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be acquired or `BEGIN` fails
    pub async fn begin(pool: &SqlitePool) -> Result<Self, DatabaseError> {
        let transaction = pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(format!("begin failed: {e}")))?;
        Ok(Self::new(transaction))
    }
}

impl<'c> TransactionGuard<'c> {
    /// Wrap an already started transaction
    #[must_use]
    pub fn new(transaction: Transaction<'c, Sqlite>) -> Self {
        debug!("Transaction started");
        Self {
            transaction: Some(transaction),
            committed: false,
        }
    }

    /// Commit and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails or the guard was already consumed
    pub async fn commit(mut self) -> Result<(), DatabaseError> {
        let transaction = self.transaction.take().ok_or_else(|| {
            DatabaseError::TransactionFailed("transaction already consumed".into())
        })?;
        transaction
            .commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(format!("commit failed: {e}")))?;
        self.committed = true;
        debug!("Transaction committed");
        Ok(())
    }

    /// Roll back and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails or the guard was already consumed
    pub async fn rollback(mut self) -> Result<(), DatabaseError> {
        let transaction = self.transaction.take().ok_or_else(|| {
            DatabaseError::TransactionFailed("transaction already consumed".into())
        })?;
        transaction
            .rollback()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(format!("rollback failed: {e}")))?;
        debug!("Transaction rolled back");
        Ok(())
    }

    /// Whether `commit()` succeeded
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Connection to run statements inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already committed or rolled back
    pub fn executor(&mut self) -> Result<&mut SqliteConnection, DatabaseError> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            DatabaseError::TransactionFailed("guard used after commit or rollback".into())
        })
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        if self.transaction.is_some() && !self.committed {
            warn!("Transaction dropped without commit; rolling back");
        }
    }
}
