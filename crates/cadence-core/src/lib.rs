// ABOUTME: Core types and constants for the Cadence training signal engine
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cadence Core
//!
//! Foundation crate providing shared types and constants for the Cadence training
//! signal engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Signal names, analysis thresholds, and goal projection bounds
//! - **models**: Journal entries, fitness tests, signals, goals, and pattern analyses

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`JournalEntry`, `FitnessTest`, `Signal`, `Goal`, `PatternAnalysis`)
pub mod models;
