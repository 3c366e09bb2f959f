// ABOUTME: Subcommand implementations for the cadence CLI
// ABOUTME: Each command builds a service over the database and prints JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod analysis;
pub mod goal;
pub mod seed;

use anyhow::Result;
use serde::Serialize;

/// Pretty-print `value` as JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
