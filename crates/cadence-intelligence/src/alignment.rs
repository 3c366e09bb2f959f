// ABOUTME: Aligns irregularly-timed signals onto daily buckets over a fixed window
// ABOUTME: Same-day samples reduce by declared policy; missing days stay explicitly absent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::{ReductionPolicies, ReductionPolicy};
use cadence_core::errors::AnalysisError;
use cadence_core::models::{Signal, Timeframe};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DayWindow {
    /// Window from `start` to `end` inclusive; `None` if `end` precedes `start`
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// The `days`-long window ending on `end` (at least one day)
    ///
    /// Saturates at the earliest representable date instead of overflowing.
    #[must_use]
    pub fn ending_on(end: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1)) - 1;
        let start = Duration::try_days(span)
            .and_then(|span| end.checked_sub_signed(span))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// First day
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of day buckets
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    /// Always false; a window holds at least one day
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether `day` falls inside the window
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Bucket index of `day`
    #[must_use]
    pub fn index_of(&self, day: NaiveDate) -> Option<usize> {
        self.contains(day)
            .then(|| usize::try_from((day - self.start).num_days()).ok())
            .flatten()
    }

    /// Day at bucket `index`
    #[must_use]
    pub fn day_at(&self, index: usize) -> Option<NaiveDate> {
        let offset = i64::try_from(index).ok()?;
        let day = self.start + Duration::days(offset);
        self.contains(day).then_some(day)
    }

    /// UTC instant the window opens
    #[must_use]
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// UTC instant just after the last day closes
    #[must_use]
    pub fn end_instant(&self) -> DateTime<Utc> {
        (self.end + Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc()
    }

    /// Persistable form
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        Timeframe {
            start: self.start,
            end: self.end,
        }
    }
}

/// One value slot per day of a window; `None` marks a day without data
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    variable: String,
    window: DayWindow,
    values: Vec<Option<f64>>,
}

impl AlignedSeries {
    /// Build a series from per-day values starting at the window's first day.
    ///
    /// Extra values are ignored and missing trailing days are absent.
    #[must_use]
    pub fn from_daily_values(
        variable: impl Into<String>,
        window: DayWindow,
        daily: &[Option<f64>],
    ) -> Self {
        let mut values = vec![None; window.len()];
        for (slot, value) in values.iter_mut().zip(daily) {
            *slot = value.filter(|v| v.is_finite());
        }
        Self {
            variable: variable.into(),
            window,
            values,
        }
    }

    /// Variable name
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Window covered
    #[must_use]
    pub const fn window(&self) -> DayWindow {
        self.window
    }

    /// Per-day slots
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Value on `day`, if observed
    #[must_use]
    pub fn value_on(&self, day: NaiveDate) -> Option<f64> {
        self.window
            .index_of(day)
            .and_then(|index| self.values.get(index).copied().flatten())
    }

    /// Observed `(day index, value)` pairs in day order
    pub fn observations(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| value.map(|v| (index, v)))
    }

    /// Number of days with a value
    #[must_use]
    pub fn observed_days(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    /// `(self[d], other[d + lag_days])` for every day where both are observed
    #[must_use]
    pub fn paired_with(&self, other: &Self, lag_days: u32) -> Vec<(f64, f64)> {
        let lag = Duration::days(i64::from(lag_days));
        self.observations()
            .filter_map(|(index, x)| {
                let day = self.window.day_at(index)? + lag;
                other.value_on(day).map(|y| (x, y))
            })
            .collect()
    }
}

/// Paired observations of `first` and `second` (shifted by `lag_days`)
///
/// # Errors
///
/// Returns `InsufficientData` when fewer than `minimum` days pair up
pub fn paired_observations(
    first: &AlignedSeries,
    second: &AlignedSeries,
    lag_days: u32,
    minimum: usize,
) -> Result<Vec<(f64, f64)>, AnalysisError> {
    let pairs = first.paired_with(second, lag_days);
    if pairs.len() < minimum {
        return Err(AnalysisError::InsufficientData {
            first: first.variable.clone(),
            second: second.variable.clone(),
            paired: pairs.len(),
            required: minimum,
        });
    }
    Ok(pairs)
}

enum DayBucket {
    Mean { sum: f64, count: u32 },
    LastWrite { at: DateTime<Utc>, value: f64 },
}

impl DayBucket {
    fn start(policy: ReductionPolicy, signal: &Signal) -> Self {
        match policy {
            ReductionPolicy::Mean => Self::Mean {
                sum: signal.value(),
                count: 1,
            },
            ReductionPolicy::LastWrite => Self::LastWrite {
                at: signal.recorded_at(),
                value: signal.value(),
            },
        }
    }

    fn absorb(&mut self, signal: &Signal) {
        match self {
            Self::Mean { sum, count } => {
                *sum += signal.value();
                *count += 1;
            }
            Self::LastWrite { at, value } => {
                // equal timestamps: later input wins
                if signal.recorded_at() >= *at {
                    *at = signal.recorded_at();
                    *value = signal.value();
                }
            }
        }
    }

    fn reduce(&self) -> f64 {
        match self {
            Self::Mean { sum, count } => *sum / f64::from(*count),
            Self::LastWrite { value, .. } => *value,
        }
    }
}

/// Resamples signals onto daily buckets
pub struct SeriesAligner<'a> {
    policies: &'a ReductionPolicies,
}

impl<'a> SeriesAligner<'a> {
    /// Create an aligner using the declared policies
    #[must_use]
    pub const fn new(policies: &'a ReductionPolicies) -> Self {
        Self { policies }
    }

    /// One series per variable with a declared policy, keyed and ordered by name.
    ///
    /// Signals outside `window` are ignored. Variables without a declared policy
    /// are skipped and logged.
    #[must_use]
    pub fn align(&self, signals: &[Signal], window: DayWindow) -> BTreeMap<String, AlignedSeries> {
        let mut buckets: BTreeMap<&str, Vec<Option<DayBucket>>> = BTreeMap::new();
        let mut undeclared: BTreeSet<&str> = BTreeSet::new();

        for signal in signals {
            let Some(index) = window.index_of(signal.day()) else {
                continue;
            };
            let Some(policy) = self.policies.policy_for(signal.variable()) else {
                undeclared.insert(signal.variable());
                continue;
            };

            let days = buckets
                .entry(signal.variable())
                .or_insert_with(|| (0..window.len()).map(|_| None).collect());
            if let Some(bucket) = days[index].as_mut() {
                bucket.absorb(signal);
                continue;
            }
            days[index] = Some(DayBucket::start(policy, signal));
        }

        for variable in undeclared {
            warn!(
                signal.variable = %variable,
                "Skipping signal without a declared reduction policy"
            );
        }

        buckets
            .into_iter()
            .map(|(variable, days)| {
                let values = days
                    .iter()
                    .map(|bucket| bucket.as_ref().map(DayBucket::reduce))
                    .collect();
                (
                    variable.to_owned(),
                    AlignedSeries {
                        variable: variable.to_owned(),
                        window,
                        values,
                    },
                )
            })
            .collect()
    }
}
