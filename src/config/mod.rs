// ABOUTME: Configuration management module for database, logging, and engine settings
// ABOUTME: Environment-only configuration; there are no configuration files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Cadence
//!
//! - **Environment**: `ServerConfig` assembled from environment variables
//! - **Engine**: `EngineConfig` (window, minimum pairs, lag search, thresholds) from
//!   `cadence-intelligence`

/// Environment and database configuration
pub mod environment;

pub use cadence_intelligence::config::{ConfigError, EngineConfig};
pub use environment::{DatabaseConfig, DatabaseUrl, LogLevel, ServerConfig};
