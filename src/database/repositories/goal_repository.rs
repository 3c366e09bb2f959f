// ABOUTME: SQLite implementation of GoalRepository
// ABOUTME: Goals plus an append-only value history used for projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{query_error, GoalRepository};
use crate::database::mappers::{format_timestamp, GoalProgressRow, GoalRow};
use crate::database::Database;
use async_trait::async_trait;
use cadence_core::errors::DatabaseError;
use cadence_core::models::{Goal, GoalProgressPoint, GoalUpdate};
use uuid::Uuid;

fn goal_not_found(goal_id: Uuid) -> DatabaseError {
    DatabaseError::NotFound {
        entity_type: "Goal",
        entity_id: goal_id.to_string(),
    }
}

#[async_trait]
impl GoalRepository for Database {
    async fn create_goal(&self, goal: &Goal) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            INSERT INTO goals (
                id, user_id, title, metric, unit, target_value, current_value,
                created_at, deadline, success_probability, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(goal.id.to_string())
        .bind(goal.user_id.to_string())
        .bind(&goal.title)
        .bind(&goal.metric)
        .bind(goal.unit.as_deref())
        .bind(goal.target_value)
        .bind(goal.current_value)
        .bind(format_timestamp(goal.created_at))
        .bind(format_timestamp(goal.deadline))
        .bind(goal.success_probability)
        .bind(format_timestamp(goal.updated_at))
        .execute(self.pool())
        .await
        .map_err(|e| query_error("create goal", &e))?;

        Ok(())
    }

    async fn get_goal(&self, goal_id: Uuid) -> Result<Goal, DatabaseError> {
        let row: Option<GoalRow> = sqlx::query_as(
            r"
            SELECT id, user_id, title, metric, unit, target_value, current_value,
                   created_at, deadline, success_probability, updated_at
            FROM goals WHERE id = ?
            ",
        )
        .bind(goal_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_error("get goal", &e))?;

        row.ok_or_else(|| goal_not_found(goal_id))?.try_into()
    }

    async fn list_goal_history(
        &self,
        goal_id: Uuid,
    ) -> Result<Vec<GoalProgressPoint>, DatabaseError> {
        let rows: Vec<GoalProgressRow> = sqlx::query_as(
            "SELECT recorded_at, value FROM goal_progress WHERE goal_id = ? ORDER BY recorded_at ASC, id ASC",
        )
        .bind(goal_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_error("list goal history", &e))?;

        rows.into_iter().map(GoalProgressPoint::try_from).collect()
    }

    async fn append_goal_progress(
        &self,
        goal_id: Uuid,
        point: GoalProgressPoint,
    ) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO goal_progress (goal_id, recorded_at, value) VALUES (?, ?, ?)")
            .bind(goal_id.to_string())
            .bind(format_timestamp(point.recorded_at))
            .bind(point.value)
            .execute(self.pool())
            .await
            .map_err(|e| query_error("append goal progress", &e))?;

        Ok(())
    }

    async fn update_goal(&self, goal_id: Uuid, update: GoalUpdate) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE goals SET current_value = ?, success_probability = ?, updated_at = ? WHERE id = ?",
        )
        .bind(update.current_value)
        .bind(update.success_probability)
        .bind(format_timestamp(update.updated_at))
        .bind(goal_id.to_string())
        .execute(self.pool())
        .await
        .map_err(|e| query_error("update goal", &e))?;

        if result.rows_affected() == 0 {
            return Err(goal_not_found(goal_id));
        }
        Ok(())
    }
}
