// ABOUTME: goal subcommands for creating goals, recording progress, and projecting
// ABOUTME: Prints the stored goal together with its projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::print_json;
use anyhow::Result;
use cadence::config::EngineConfig;
use cadence::database::Database;
use cadence::models::NewGoal;
use cadence::services::TrainingAnalysisService;
use chrono::{Duration, Utc};
use uuid::Uuid;

pub struct CreateGoal {
    pub user_id: Uuid,
    pub title: String,
    pub metric: String,
    pub unit: Option<String>,
    pub target: f64,
    pub current: f64,
    pub deadline_days: i64,
}

pub async fn create(database: &Database, engine: &EngineConfig, request: CreateGoal) -> Result<()> {
    let now = Utc::now();
    let new_goal = NewGoal {
        user_id: request.user_id,
        title: request.title,
        metric: request.metric,
        unit: request.unit,
        target_value: request.target,
        current_value: request.current,
        deadline: now + Duration::days(request.deadline_days),
    };

    let service = TrainingAnalysisService::new(database, engine);
    let snapshot = service.create_goal(new_goal, now).await?;
    print_json(&snapshot)
}

pub async fn progress(
    database: &Database,
    engine: &EngineConfig,
    goal_id: Uuid,
    value: f64,
) -> Result<()> {
    let service = TrainingAnalysisService::new(database, engine);
    let snapshot = service
        .record_goal_progress(goal_id, value, Utc::now())
        .await?;
    print_json(&snapshot)
}

pub async fn project(database: &Database, engine: &EngineConfig, goal_id: Uuid) -> Result<()> {
    let service = TrainingAnalysisService::new(database, engine);
    let snapshot = service.refresh_goal_projection(goal_id, Utc::now()).await?;
    print_json(&snapshot)
}
