// ABOUTME: Main library entry point for the Cadence training signal engine
// ABOUTME: Wires the pure analysis crates to SQLite persistence, configuration, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cadence
//!
//! Cadence reads a user's training journal (workouts, nutrition, biometrics, sleep,
//! and subjective ratings) plus fitness tests, finds statistically notable
//! relationships between those signals, and projects goal progress.
//!
//! ## Architecture
//!
//! - **`cadence-core`**: errors, constants, and domain models
//! - **`cadence-intelligence`**: pure statistics (alignment, correlation, insights,
//!   goal projection)
//! - **database**: `SQLite` storage behind async repository traits
//! - **services**: the per-request [`services::TrainingAnalysisService`]
//!
//! The correlation engine reports co-movement only. Goal probabilities are an
//! ahead/behind-pace heuristic.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cadence::config::environment::ServerConfig;
//! use cadence::database::Database;
//! use cadence::services::TrainingAnalysisService;
//! use chrono::Utc;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database.url.to_connection_string()).await?;
//!     let service = TrainingAnalysisService::new(&database, &config.engine);
//!
//!     let run = service.run_pattern_analysis(Uuid::new_v4(), Utc::now()).await?;
//!     println!("{} patterns written", run.patterns_written);
//!     Ok(())
//! }
//! ```

/// Configuration loaded from the environment
pub mod config;

/// Application constants re-exported from `cadence-core`
pub mod constants;

/// `SQLite` persistence and repository traits
pub mod database;

/// Unified error handling re-exported from `cadence-core`
pub mod errors;

/// Statistical engine re-exported from `cadence-intelligence`
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Domain models re-exported from `cadence-core`
pub mod models;

/// Request-scoped application services
pub mod services;
