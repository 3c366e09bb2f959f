// ABOUTME: Unified error handling with error codes, context, and domain error conversions
// ABOUTME: Defines AppError, ErrorCode, and AppResult shared by every crate in the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Centralized error handling for the Cadence workspace. Domain errors
//! (`AnalysisError`, `DatabaseError`) carry precise context and convert into
//! `AppError`, which is what services hand back to their callers.

/// Analysis engine errors (insufficient data, invalid goal state, persistence)
pub mod analysis;

/// Database errors with sqlx conversion
pub mod database;

pub use analysis::AnalysisError;
pub use database::DatabaseError;

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A numeric value fell outside its allowed range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,
    /// Goal target or deadline cannot be tracked
    #[serde(rename = "INVALID_GOAL_STATE")]
    InvalidGoalState = 3100,

    // Resource Management (4000-4999)
    /// Requested entity does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Entity belongs to a different user
    #[serde(rename = "RESOURCE_NOT_OWNED")]
    ResourceNotOwned = 4004,

    // Analysis (5000-5999)
    /// Not enough paired observations to analyze
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData = 5100,
    /// Analysis run aborted without writing results
    #[serde(rename = "ANALYSIS_FAILED")]
    AnalysisFailed = 5101,

    // Configuration (6000-6999)
    /// Configuration value is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure (e.g. a background task panicked)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Database operation failed
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    /// Stored data could not be (de)serialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::InvalidGoalState => "The goal cannot be tracked in its current state",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceNotOwned => "The resource belongs to a different user",
            Self::InsufficientData => "Not enough data is available for this analysis",
            Self::AnalysisFailed => "Analysis failed, please retry",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether a caller may retry the failed operation unchanged
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::AnalysisFailed | Self::DatabaseError)
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// User ID if available
    pub user_id: Option<Uuid>,
    /// Resource ID if applicable
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            user_id: None,
            resource_id: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a user ID to the error context
    #[must_use]
    pub const fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.context.user_id = Some(user_id);
        self
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the failed operation may be retried unchanged
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside of its allowed range
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource owned by a different user
    #[must_use]
    pub fn not_owned(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotOwned,
            format!("{} does not belong to this user", resource.into()),
        )
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Invalid configuration value
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<AnalysisError> for AppError {
    fn from(error: AnalysisError) -> Self {
        match &error {
            AnalysisError::InsufficientData { .. } => {
                Self::new(ErrorCode::InsufficientData, error.to_string())
            }
            AnalysisError::InvalidGoalState { .. } => {
                Self::new(ErrorCode::InvalidGoalState, error.to_string())
            }
            AnalysisError::RatingOutOfRange { field, value } => {
                Self::out_of_range(error.to_string())
                    .with_details(serde_json::json!({ "field": field, "value": value }))
            }
            AnalysisError::Persistence { .. } => {
                Self::new(ErrorCode::AnalysisFailed, error.to_string())
            }
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        let converted = match &error {
            DatabaseError::NotFound {
                entity_type,
                entity_id,
            } => Self::not_found(format!("{entity_type} {entity_id}"))
                .with_resource_id(entity_id.clone()),
            DatabaseError::NotOwned {
                entity_type,
                entity_id,
            } => Self::not_owned(format!("{entity_type} {entity_id}"))
                .with_resource_id(entity_id.clone()),
            DatabaseError::InvalidRow { .. } | DatabaseError::Serialization(_) => {
                Self::new(ErrorCode::SerializationError, error.to_string())
            }
            _ => Self::database(error.to_string()),
        };
        converted.with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_codes() {
        assert!(ErrorCode::AnalysisFailed.is_retryable());
        assert!(ErrorCode::DatabaseError.is_retryable());
        assert!(!ErrorCode::InvalidGoalState.is_retryable());
        assert!(!ErrorCode::InsufficientData.is_retryable());
    }

    #[test]
    fn test_analysis_error_conversion() {
        let error: AppError = AnalysisError::Persistence {
            context: "insert failed".into(),
        }
        .into();
        assert_eq!(error.code, ErrorCode::AnalysisFailed);
        assert!(error.is_retryable());
        assert!(error.message.contains("insert failed"));
    }

    #[test]
    fn test_not_found_conversion_keeps_resource_id() {
        let error: AppError = DatabaseError::NotFound {
            entity_type: "Goal",
            entity_id: "abc".into(),
        }
        .into();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.context.resource_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_rating_error_carries_field_details() {
        let error: AppError = AnalysisError::RatingOutOfRange {
            field: "mood",
            value: 11,
        }
        .into();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        assert_eq!(error.context.details["field"], "mood");
        assert_eq!(error.context.details["value"], 11);
    }

    #[test]
    fn test_foreign_row_maps_to_not_owned_with_source() {
        let error: AppError = DatabaseError::NotOwned {
            entity_type: "PatternAnalysis",
            entity_id: "p-1".into(),
        }
        .into();
        assert_eq!(error.code, ErrorCode::ResourceNotOwned);
        assert!(!error.is_retryable());
        assert_eq!(error.context.resource_id.as_deref(), Some("p-1"));
        assert!(StdError::source(&error).is_some());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::InvalidGoalState).unwrap();
        assert_eq!(json, "\"INVALID_GOAL_STATE\"");
    }
}
