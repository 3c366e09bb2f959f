// ABOUTME: seed subcommand generating synthetic journal history with planted relationships
// ABOUTME: Sleep drives same-day intensity, hydration drives next-day energy, protein eases soreness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::print_json;
use anyhow::Result;
use cadence::config::EngineConfig;
use cadence::database::{Database, JournalRepository};
use cadence::models::{
    JournalEntry, NutritionMetrics, Rating, SleepMetrics, SubjectiveMetrics, WorkoutMetrics,
};
use cadence::services::TrainingAnalysisService;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

const ENTRY_HOUR: u32 = 7;

fn rating(value: f64) -> Option<Rating> {
    Rating::new(value.round().clamp(1.0, 10.0) as u8)
}

fn entry_for_day(
    rng: &mut StdRng,
    user_id: Uuid,
    recorded_at: DateTime<Utc>,
    previous_hydration: Option<f64>,
) -> (JournalEntry, f64) {
    let sleep_quality: f64 = f64::from(rng.gen_range(4_u8..=9));
    let hydration = rng.gen_range(1.5..3.5);
    let protein = rng.gen_range(90.0..190.0);
    let energy = previous_hydration.map_or(5.0, |liters: f64| {
        2.0_f64.mul_add(liters, 1.0) + rng.gen_range(-0.8..0.8)
    });

    let workout = WorkoutMetrics {
        duration_minutes: Some(rng.gen_range(35.0..75.0)),
        intensity: Some(6.0_f64.mul_add(sleep_quality, 30.0) + rng.gen_range(-4.0..4.0)),
        volume_kg: Some(rng.gen_range(4_000.0..9_000.0)),
        rpe: Some(f64::from(rng.gen_range(5_u8..=9))),
        rir: None,
    };
    let nutrition = NutritionMetrics {
        calories: Some(rng.gen_range(2_100.0..3_000.0)),
        protein_grams: Some(protein),
        carbs_grams: None,
        fat_grams: None,
        hydration_liters: Some(hydration),
    };
    let subjective = SubjectiveMetrics {
        mood: rating(f64::from(rng.gen_range(4_u8..=8))),
        energy: rating(energy),
        motivation: rating(f64::from(rng.gen_range(3_u8..=9))),
        stress: rating(f64::from(rng.gen_range(2_u8..=8))),
        soreness: rating(8.0 - (protein - 90.0) / 20.0 + rng.gen_range(-0.6..0.6)),
    };

    let entry = JournalEntry::new(user_id, recorded_at)
        .with_workout(workout)
        .with_nutrition(nutrition)
        .with_sleep(SleepMetrics {
            hours: Some(0.4_f64.mul_add(sleep_quality, 5.0) + rng.gen_range(-0.3..0.3)),
            quality: rating(sleep_quality),
        })
        .with_subjective(subjective);

    (entry, hydration)
}

pub async fn run(
    database: &Database,
    engine: &EngineConfig,
    user_id: Option<Uuid>,
    days: u32,
    seed: Option<u64>,
) -> Result<()> {
    let user_id = user_id.unwrap_or_else(Uuid::new_v4);
    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let now = Utc::now();
    let today = now.date_naive();

    let mut previous_hydration = None;
    for offset in (0..days).rev() {
        let day = today - Duration::days(i64::from(offset));
        let recorded_at = day
            .and_time(NaiveTime::MIN + Duration::hours(i64::from(ENTRY_HOUR)))
            .and_utc();
        let (entry, hydration) = entry_for_day(&mut rng, user_id, recorded_at, previous_hydration);
        database.insert_entry(&entry).await?;
        previous_hydration = Some(hydration);
    }
    info!(user.id = %user_id, days, "Seeded journal entries");

    let service = TrainingAnalysisService::new(database, engine);
    let run = service.run_pattern_analysis(user_id, now).await?;

    print_json(&json!({
        "user_id": user_id,
        "entries": days,
        "analysis": run,
    }))
}
