// ABOUTME: analyze and patterns subcommands
// ABOUTME: Runs a pattern analysis or prints the rows of the latest run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::print_json;
use anyhow::Result;
use cadence::config::EngineConfig;
use cadence::database::Database;
use cadence::services::TrainingAnalysisService;
use chrono::Utc;
use uuid::Uuid;

pub async fn analyze(database: &Database, engine: &EngineConfig, user_id: Uuid) -> Result<()> {
    let service = TrainingAnalysisService::new(database, engine);
    let run = service.run_pattern_analysis(user_id, Utc::now()).await?;
    print_json(&run)
}

pub async fn patterns(database: &Database, engine: &EngineConfig, user_id: Uuid) -> Result<()> {
    let service = TrainingAnalysisService::new(database, engine);
    let patterns = service.latest_patterns(user_id).await?;
    print_json(&patterns)
}
