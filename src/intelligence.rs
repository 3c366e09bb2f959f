// ABOUTME: Statistical engine re-exported from cadence-intelligence
// ABOUTME: Signal extraction, alignment, correlation, insights, trends, and goal projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use cadence_intelligence::*;
