// ABOUTME: Application constants re-exported from cadence-core
// ABOUTME: Signal variable names, analysis thresholds, goal bounds, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use cadence_core::constants::*;
