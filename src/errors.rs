// ABOUTME: Unified error handling re-exported from cadence-core
// ABOUTME: AppError, ErrorCode, and the domain error enums used across the crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every fallible public operation returns [`AppResult`]. Domain errors
//! ([`AnalysisError`], [`DatabaseError`]) convert into [`AppError`] with `?`, and
//! [`AppError::is_retryable`] tells callers whether a retry may succeed.

pub use cadence_core::errors::*;
