// ABOUTME: Criterion benchmarks for the correlation engine
// ABOUTME: Measures alignment, pairwise lag correlation, and full analysis runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the signal correlation pipeline.
//!
//! Pairwise analysis grows quadratically with the number of variables, so the
//! groups below sweep the variable count over a 90-day window.

#![allow(clippy::missing_docs_in_private_items, clippy::unwrap_used, missing_docs)]

use cadence::constants::signals::RATE_LIKE;
use cadence::intelligence::{
    CorrelationEngine, EngineConfig, RunContext, SeriesAligner, TrainingSignalEngine,
};
use cadence::models::Signal;
use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

const WINDOW_DAYS: i64 = 90;
const VARIABLE_COUNTS: [usize; 3] = [5, 10, 20];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 10, 18, 0, 0).unwrap()
}

/// Two samples per day per variable, with a shared daily driver so some pairs correlate
fn generate_signals(variable_count: usize) -> Vec<Signal> {
    let mut rng = StdRng::seed_from_u64(42);
    let end = now();
    let mut signals = Vec::new();

    for day in 0..WINDOW_DAYS {
        let driver: f64 = rng.gen_range(0.0..10.0);
        for (index, variable) in RATE_LIKE.iter().take(variable_count).enumerate() {
            let weight = if index % 2 == 0 { 1.0 } else { -0.5 };
            for hour in [7, 19] {
                let at = end - Duration::days(day) - Duration::hours(hour);
                let value = weight * driver + rng.gen_range(-2.0..2.0);
                signals.push(Signal::new(at, *variable, value).unwrap());
            }
        }
    }
    signals
}

fn bench_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment");
    let config = EngineConfig::default();
    let engine = TrainingSignalEngine::new(&config);
    let window = engine.window_ending(now());

    for count in VARIABLE_COUNTS {
        let signals = generate_signals(count);
        group.throughput(Throughput::Elements(signals.len() as u64));
        group.bench_with_input(BenchmarkId::new("align", count), &signals, |b, signals| {
            let aligner = SeriesAligner::new(&config.reduction);
            b.iter(|| aligner.align(black_box(signals), window));
        });
    }

    group.finish();
}

fn bench_pairwise_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise");
    let config = EngineConfig::default();
    let window = TrainingSignalEngine::new(&config).window_ending(now());

    for count in VARIABLE_COUNTS {
        let series = SeriesAligner::new(&config.reduction).align(&generate_signals(count), window);
        group.throughput(Throughput::Elements((count * (count - 1) / 2) as u64));
        group.bench_with_input(BenchmarkId::new("analyze", count), &series, |b, series| {
            let engine = CorrelationEngine::new(&config);
            b.iter(|| engine.analyze(black_box(series)));
        });
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let config = EngineConfig::default();
    let engine = TrainingSignalEngine::new(&config);
    let window = engine.window_ending(now());
    let context = RunContext::new(Uuid::new_v4(), now());

    for count in VARIABLE_COUNTS {
        let signals = generate_signals(count);
        group.bench_with_input(BenchmarkId::new("run", count), &signals, |b, signals| {
            b.iter(|| engine.analyze(black_box(signals), &context, window));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_alignment,
    bench_pairwise_analysis,
    bench_full_run,
);
criterion_main!(benches);
