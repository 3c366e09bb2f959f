// ABOUTME: Per-request service that persists training data and keeps derived analyses current
// ABOUTME: Runs pattern analysis after each write and refreshes goal success probabilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Training Analysis Service
//!
//! Stateless: build one per request with [`TrainingAnalysisService::new`] over any
//! [`TrainingStore`]. Every journal or fitness test write is followed by a pattern
//! analysis run whose rows are appended in one transaction.

use crate::config::EngineConfig;
use crate::database::TrainingStore;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use cadence_core::errors::AnalysisError;
use cadence_core::models::{
    FitnessTest, Goal, GoalProgressPoint, GoalUpdate, JournalEntry, NewGoal, PatternAnalysis,
    Timeframe,
};
use cadence_intelligence::{
    GoalProgressProjector, GoalProjection, PaceStatus, RunContext, TrainingSignalEngine,
    TrendEstimate,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tokio::task;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

/// Summary of one pattern analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRun {
    /// Run identifier stamped on every written row
    pub run_id: Uuid,
    /// User analyzed
    pub user_id: Uuid,
    /// Days covered
    pub timeframe: Timeframe,
    /// Signals read inside the window
    pub signal_count: usize,
    /// Pattern rows appended
    pub patterns_written: usize,
    /// Pairs with enough paired data to correlate
    pub evaluated_pairs: usize,
    /// Pairs skipped for insufficient paired data
    pub skipped_pairs: usize,
    /// Per-variable linear trends
    pub trends: Vec<TrendEstimate>,
}

/// A goal together with its latest projection
#[derive(Debug, Clone, Serialize)]
pub struct GoalSnapshot {
    /// Goal as stored after the projection was written back
    pub goal: Goal,
    /// Projection details
    pub projection: GoalProjection,
}

/// Training data and analysis operations for one request
pub struct TrainingAnalysisService<'a, S: TrainingStore> {
    store: &'a S,
    config: &'a EngineConfig,
    projector: GoalProgressProjector,
}

impl<'a, S: TrainingStore> TrainingAnalysisService<'a, S> {
    /// Service over `store` using `config`
    #[must_use]
    pub fn new(store: &'a S, config: &'a EngineConfig) -> Self {
        Self {
            store,
            config,
            projector: GoalProgressProjector::default(),
        }
    }

    /// Persist a new journal entry, then re-run pattern analysis
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-finite metrics, a database error if the entry
    /// cannot be stored, or `AnalysisFailed` if the analysis rows cannot be written
    /// (the entry itself is kept)
    pub async fn submit_journal_entry(
        &self,
        entry: &JournalEntry,
        now: DateTime<Utc>,
    ) -> AppResult<AnalysisRun> {
        validate_entry(entry)?;
        self.store
            .insert_entry(entry)
            .await
            .map_err(|e| AppError::from(e).with_user_id(entry.user_id))?;
        debug!(user.id = %entry.user_id, entry.id = %entry.id, "Journal entry stored");
        self.run_pattern_analysis(entry.user_id, now).await
    }

    /// Persist a user edit of an existing entry, then re-run pattern analysis
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the entry does not exist for the user, plus the
    /// errors of [`Self::submit_journal_entry`]
    pub async fn update_journal_entry(
        &self,
        entry: &JournalEntry,
        now: DateTime<Utc>,
    ) -> AppResult<AnalysisRun> {
        validate_entry(entry)?;
        let mut edited = entry.clone();
        edited.updated_at = now;
        self.store
            .update_entry(&edited)
            .await
            .map_err(|e| AppError::from(e).with_user_id(entry.user_id))?;
        debug!(user.id = %entry.user_id, entry.id = %entry.id, "Journal entry updated");
        self.run_pattern_analysis(entry.user_id, now).await
    }

    /// Append a fitness test, then re-run pattern analysis
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-finite result, a database error if the test
    /// cannot be stored, or `AnalysisFailed` if the analysis rows cannot be written
    pub async fn record_fitness_test(
        &self,
        test: &FitnessTest,
        now: DateTime<Utc>,
    ) -> AppResult<AnalysisRun> {
        if let Some(result) = test.results().find(|result| !result.value.is_finite()) {
            return Err(AppError::invalid_input(format!(
                "fitness test result '{}' must be a finite number",
                result.metric
            )));
        }
        self.store
            .insert_test(test)
            .await
            .map_err(|e| AppError::from(e).with_user_id(test.user_id))?;
        self.run_pattern_analysis(test.user_id, now).await
    }

    /// Analyze the window ending on `now`'s day and append the resulting rows
    ///
    /// An empty result writes nothing and is not an error. Earlier runs are never
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns a database error if signals cannot be read, or a retryable
    /// `AnalysisFailed` if appending fails; in that case no row from the run is kept
    pub async fn run_pattern_analysis(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<AnalysisRun> {
        let started = Instant::now();
        let engine = TrainingSignalEngine::new(self.config);
        let window = engine.window_ending(now);
        let context = RunContext::new(user_id, now);

        let span = info_span!(
            "pattern_analysis",
            user.id = %user_id,
            analysis.run_id = %context.run_id
        );
        async {
            let signals = self
                .store
                .list_signals(user_id, &[], window.start_instant(), window.end_instant())
                .await
                .map_err(|e| AppError::from(e).with_user_id(user_id))?;

            let config = self.config.clone();
            let outcome = task::spawn_blocking(move || {
                TrainingSignalEngine::new(&config).analyze(&signals, &context, window)
            })
            .await
            .map_err(|e| {
                AppError::internal(format!("Pattern analysis task failed: {e}"))
                    .with_user_id(user_id)
                    .with_source(e)
            })?;

            let patterns_written = self
                .store
                .append_pattern_analyses(user_id, &outcome.patterns)
                .await
                .map_err(|e| {
                    AppLogger::log_analysis_failure(user_id, context.run_id, &e.to_string());
                    AppError::from(AnalysisError::Persistence {
                        context: e.to_string(),
                    })
                    .with_user_id(user_id)
                })?;

            AppLogger::log_analysis_run(
                user_id,
                context.run_id,
                outcome.signal_count,
                patterns_written,
                outcome.skipped_pairs,
                u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            );

            Ok::<_, AppError>(AnalysisRun {
                run_id: context.run_id,
                user_id,
                timeframe: window.timeframe(),
                signal_count: outcome.signal_count,
                patterns_written,
                evaluated_pairs: outcome.evaluated_pairs,
                skipped_pairs: outcome.skipped_pairs,
                trends: outcome.trends,
            })
        }
        .instrument(span)
        .await
    }

    /// Pattern rows of the user's most recent run
    ///
    /// # Errors
    ///
    /// Returns a database error if the rows cannot be read
    pub async fn latest_patterns(&self, user_id: Uuid) -> AppResult<Vec<PatternAnalysis>> {
        self.store
            .list_latest_patterns(user_id)
            .await
            .map_err(|e| AppError::from(e).with_user_id(user_id))
    }

    /// Validate, project, and store a new goal
    ///
    /// # Errors
    ///
    /// Returns `InvalidGoalState` for a zero target or a deadline not after `now`, or a
    /// database error if the goal cannot be stored
    pub async fn create_goal(
        &self,
        new_goal: NewGoal,
        now: DateTime<Utc>,
    ) -> AppResult<GoalSnapshot> {
        new_goal.validate(now)?;
        let user_id = new_goal.user_id;

        let mut goal = new_goal.into_goal(now, 0.0);
        let projection = self.projector.project(&goal, &[], now)?;
        goal.success_probability = projection.success_probability;

        self.store
            .create_goal(&goal)
            .await
            .map_err(|e| AppError::from(e).with_user_id(user_id))?;
        AppLogger::log_goal_projection(
            goal.id,
            goal.success_probability,
            pace_label(projection.pace),
        );

        Ok(GoalSnapshot { goal, projection })
    }

    /// Append a value sample to a goal's history and refresh its projection
    ///
    /// The projection is evaluated at `recorded_at`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-finite value, `ResourceNotFound` for an unknown
    /// goal, or a database error
    pub async fn record_goal_progress(
        &self,
        goal_id: Uuid,
        value: f64,
        recorded_at: DateTime<Utc>,
    ) -> AppResult<GoalSnapshot> {
        if !value.is_finite() {
            return Err(
                AppError::invalid_input("goal progress value must be a finite number")
                    .with_resource_id(goal_id.to_string()),
            );
        }
        self.store.get_goal(goal_id).await?;
        self.store
            .append_goal_progress(goal_id, GoalProgressPoint { recorded_at, value })
            .await?;
        self.refresh_goal_projection(goal_id, recorded_at).await
    }

    /// Recompute a goal's projection at `now` and write back the derived fields
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown goal, `InvalidGoalState` if the stored
    /// goal cannot be projected, or a database error
    pub async fn refresh_goal_projection(
        &self,
        goal_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<GoalSnapshot> {
        let mut goal = self.store.get_goal(goal_id).await?;
        let history = self.store.list_goal_history(goal_id).await?;
        let projection = self
            .projector
            .project(&goal, &history, now)
            .map_err(|e| AppError::from(e).with_resource_id(goal_id.to_string()))?;

        let update = GoalUpdate {
            current_value: projection.current_value,
            success_probability: projection.success_probability,
            updated_at: now,
        };
        self.store.update_goal(goal_id, update).await?;
        AppLogger::log_goal_projection(
            goal_id,
            update.success_probability,
            pace_label(projection.pace),
        );

        goal.current_value = update.current_value;
        goal.success_probability = update.success_probability;
        goal.updated_at = update.updated_at;
        Ok(GoalSnapshot { goal, projection })
    }
}

const fn pace_label(pace: PaceStatus) -> &'static str {
    match pace {
        PaceStatus::Ahead => "ahead",
        PaceStatus::OnPace => "on_pace",
        PaceStatus::Behind => "behind",
    }
}

fn validate_entry(entry: &JournalEntry) -> AppResult<()> {
    let mut values: Vec<(&str, Option<f64>)> = Vec::new();
    if let Some(w) = &entry.workout {
        values.extend([
            ("workout.duration_minutes", w.duration_minutes),
            ("workout.intensity", w.intensity),
            ("workout.volume_kg", w.volume_kg),
            ("workout.rpe", w.rpe),
            ("workout.rir", w.rir),
        ]);
    }
    if let Some(n) = &entry.nutrition {
        values.extend([
            ("nutrition.calories", n.calories),
            ("nutrition.protein_grams", n.protein_grams),
            ("nutrition.carbs_grams", n.carbs_grams),
            ("nutrition.fat_grams", n.fat_grams),
            ("nutrition.hydration_liters", n.hydration_liters),
        ]);
    }
    if let Some(b) = &entry.biometrics {
        values.extend([
            ("biometrics.body_weight_kg", b.body_weight_kg),
            ("biometrics.body_fat_percent", b.body_fat_percent),
            ("biometrics.resting_heart_rate", b.resting_heart_rate),
            ("biometrics.hrv_ms", b.hrv_ms),
        ]);
    }
    if let Some(s) = &entry.sleep {
        values.push(("sleep.hours", s.hours));
    }

    match values
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
    {
        Some((field, _)) => Err(AppError::invalid_input(format!(
            "{field} must be a finite number"
        ))
        .with_user_id(entry.user_id)
        .with_resource_id(entry.id.to_string())),
        None => Ok(()),
    }
}
