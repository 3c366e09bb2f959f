// ABOUTME: Environment-based configuration for the database, logging, and analysis engine
// ABOUTME: Parses DATABASE_URL and CADENCE_* variables with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use cadence_intelligence::config::{ConfigError, EngineConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Default on-disk database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/cadence.db";

/// Log level for the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse a level name, falling back to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory `SQLite` (tests and dry runs)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty value or a non-`SQLite` scheme
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }

        if let Some(path) = trimmed.strip_prefix("sqlite:") {
            let path = path.trim_start_matches("//");
            return if path == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path),
                })
            };
        }

        if trimmed.contains("://") {
            return Err(AppError::config(format!(
                "Unsupported database URL scheme: {trimmed}"
            )));
        }

        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Connection string understood by sqlx
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Whether this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/cadence.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Create tables on startup
    pub auto_migrate: bool,
}

/// Full service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Database settings
    pub database: DatabaseConfig,
    /// Correlation engine settings
    pub engine: EngineConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending variable when a value cannot be parsed
    /// or the engine settings are inconsistent
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL))?,
                auto_migrate: parse_bool("CADENCE_AUTO_MIGRATE", true)?,
            },
            engine: EngineConfig::from_environment().map_err(config_error)?,
        };

        info!(
            database.url = %config.database.url,
            database.auto_migrate = config.database.auto_migrate,
            analysis.window_days = config.engine.window_days,
            analysis.min_paired_observations = config.engine.min_paired_observations,
            analysis.max_lag_days = config.engine.max_lag_days,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Human-readable configuration summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "database={} auto_migrate={} window_days={} min_pairs={} max_lag_days={} thresholds=({}, {}) max_patterns={}",
            self.database.url,
            self.database.auto_migrate,
            self.engine.window_days,
            self.engine.min_paired_observations,
            self.engine.max_lag_days,
            self.engine.significance.medium,
            self.engine.significance.high,
            self.engine.max_patterns_per_run,
        )
    }
}

fn config_error(error: ConfigError) -> AppError {
    AppError::config(error.to_string())
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_bool(key: &'static str, default: bool) -> AppResult<bool> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(config_error(ConfigError::Parse {
                variable: key,
                value,
            })),
        },
    }
}
