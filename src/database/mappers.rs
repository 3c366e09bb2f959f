// ABOUTME: Row structs and the single row-to-domain mapping layer for the SQLite schema
// ABOUTME: Validates ratings, finite numbers, ids, and timestamps at the storage boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cadence_core::errors::DatabaseError;
use cadence_core::models::{
    FitnessTest, FitnessTestType, Goal, GoalProgressPoint, JournalEntry, PatternAnalysis, Rating,
    SignificanceTier, SleepMetrics, SubjectiveMetrics, TestResult, Timeframe,
};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical stored form of a timestamp; lexicographic order matches time order
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Stored form of a calendar day
#[must_use]
pub fn format_date(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// JSON column value for an optional block
///
/// # Errors
///
/// Returns a serialization error if the block cannot be encoded
pub fn encode_json<T: Serialize>(value: Option<&T>) -> Result<Option<String>, DatabaseError> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(DatabaseError::from)
}

fn parse_uuid(entity: &'static str, field: &str, raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw)
        .map_err(|e| DatabaseError::invalid_row(entity, format!("{field} '{raw}': {e}")))
}

fn parse_timestamp(
    entity: &'static str,
    field: &str,
    raw: &str,
) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| DatabaseError::invalid_row(entity, format!("{field} '{raw}': {e}")))
}

fn parse_date(entity: &'static str, field: &str, raw: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| DatabaseError::invalid_row(entity, format!("{field} '{raw}': {e}")))
}

fn finite(entity: &'static str, field: &str, value: f64) -> Result<f64, DatabaseError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DatabaseError::invalid_row(
            entity,
            format!("{field} is not a finite number"),
        ))
    }
}

fn finite_opt(
    entity: &'static str,
    field: &str,
    value: Option<f64>,
) -> Result<Option<f64>, DatabaseError> {
    value.map(|v| finite(entity, field, v)).transpose()
}

fn rating(
    entity: &'static str,
    field: &'static str,
    value: Option<i64>,
) -> Result<Option<Rating>, DatabaseError> {
    value
        .map(|v| Rating::for_field(field, v))
        .transpose()
        .map_err(|e| DatabaseError::invalid_row(entity, e.to_string()))
}

fn decode_json<T: DeserializeOwned>(
    entity: &'static str,
    field: &str,
    raw: Option<&str>,
) -> Result<Option<T>, DatabaseError> {
    raw.map(|text| {
        serde_json::from_str(text)
            .map_err(|e| DatabaseError::invalid_row(entity, format!("{field}: {e}")))
    })
    .transpose()
}

fn non_negative<T: TryFrom<i64>>(
    entity: &'static str,
    field: &str,
    value: i64,
) -> Result<T, DatabaseError> {
    T::try_from(value)
        .map_err(|_| DatabaseError::invalid_row(entity, format!("{field} {value} is out of range")))
}

/// `journal_entries` row
#[derive(Debug, Clone, FromRow)]
pub struct JournalEntryRow {
    /// Entry id
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Recorded timestamp
    pub recorded_at: String,
    /// Workout block as JSON
    pub workout: Option<String>,
    /// Nutrition block as JSON
    pub nutrition: Option<String>,
    /// Biometrics block as JSON
    pub biometrics: Option<String>,
    /// Hours slept
    pub sleep_hours: Option<f64>,
    /// Sleep quality rating
    pub sleep_quality: Option<i64>,
    /// Mood rating
    pub mood: Option<i64>,
    /// Energy rating
    pub energy: Option<i64>,
    /// Motivation rating
    pub motivation: Option<i64>,
    /// Stress rating
    pub stress: Option<i64>,
    /// Soreness rating
    pub soreness: Option<i64>,
    /// Notes
    pub notes: Option<String>,
    /// Tags as a JSON array
    pub tags: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last edit timestamp
    pub updated_at: String,
}

impl TryFrom<JournalEntryRow> for JournalEntry {
    type Error = DatabaseError;

    fn try_from(row: JournalEntryRow) -> Result<Self, Self::Error> {
        const ENTITY: &str = "JournalEntry";

        let sleep_quality = rating(ENTITY, "sleep_quality", row.sleep_quality)?;
        let sleep_hours = finite_opt(ENTITY, "sleep_hours", row.sleep_hours)?;
        let sleep = (sleep_hours.is_some() || sleep_quality.is_some()).then_some(SleepMetrics {
            hours: sleep_hours,
            quality: sleep_quality,
        });

        Ok(Self {
            id: parse_uuid(ENTITY, "id", &row.id)?,
            user_id: parse_uuid(ENTITY, "user_id", &row.user_id)?,
            recorded_at: parse_timestamp(ENTITY, "recorded_at", &row.recorded_at)?,
            workout: decode_json(ENTITY, "workout", row.workout.as_deref())?,
            nutrition: decode_json(ENTITY, "nutrition", row.nutrition.as_deref())?,
            biometrics: decode_json(ENTITY, "biometrics", row.biometrics.as_deref())?,
            sleep,
            subjective: SubjectiveMetrics {
                mood: rating(ENTITY, "mood", row.mood)?,
                energy: rating(ENTITY, "energy", row.energy)?,
                motivation: rating(ENTITY, "motivation", row.motivation)?,
                stress: rating(ENTITY, "stress", row.stress)?,
                soreness: rating(ENTITY, "soreness", row.soreness)?,
            },
            notes: row.notes,
            tags: decode_json(ENTITY, "tags", Some(&row.tags))?.unwrap_or_default(),
            created_at: parse_timestamp(ENTITY, "created_at", &row.created_at)?,
            updated_at: parse_timestamp(ENTITY, "updated_at", &row.updated_at)?,
        })
    }
}

/// `fitness_tests` row
#[derive(Debug, Clone, FromRow)]
pub struct FitnessTestRow {
    /// Test id
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Test category
    pub test_type: String,
    /// Protocol as JSON
    pub protocol: String,
    /// Headline metric
    pub primary_metric: String,
    /// Headline value
    pub primary_value: f64,
    /// Headline unit
    pub primary_unit: String,
    /// Secondary results as a JSON array
    pub secondary_results: String,
    /// When performed
    pub performed_at: String,
    /// Notes
    pub notes: Option<String>,
}

impl TryFrom<FitnessTestRow> for FitnessTest {
    type Error = DatabaseError;

    fn try_from(row: FitnessTestRow) -> Result<Self, Self::Error> {
        const ENTITY: &str = "FitnessTest";

        let test_type = FitnessTestType::parse(&row.test_type).ok_or_else(|| {
            DatabaseError::invalid_row(ENTITY, format!("unknown test type '{}'", row.test_type))
        })?;
        let secondary_results: Vec<TestResult> =
            decode_json(ENTITY, "secondary_results", Some(&row.secondary_results))?
                .unwrap_or_default();
        for result in &secondary_results {
            finite(ENTITY, &result.metric, result.value)?;
        }

        Ok(Self {
            id: parse_uuid(ENTITY, "id", &row.id)?,
            user_id: parse_uuid(ENTITY, "user_id", &row.user_id)?,
            test_type,
            protocol: decode_json(ENTITY, "protocol", Some(&row.protocol))?.unwrap_or_default(),
            primary_result: TestResult::new(
                row.primary_metric,
                finite(ENTITY, "primary_value", row.primary_value)?,
                row.primary_unit,
            ),
            secondary_results,
            performed_at: parse_timestamp(ENTITY, "performed_at", &row.performed_at)?,
            notes: row.notes,
        })
    }
}

/// `goals` row
#[derive(Debug, Clone, FromRow)]
pub struct GoalRow {
    /// Goal id
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Title
    pub title: String,
    /// Tracked metric
    pub metric: String,
    /// Unit
    pub unit: Option<String>,
    /// Target value
    pub target_value: f64,
    /// Latest value
    pub current_value: f64,
    /// Start of the goal period
    pub created_at: String,
    /// End of the goal period
    pub deadline: String,
    /// Derived probability
    pub success_probability: f64,
    /// Last recomputation
    pub updated_at: String,
}

impl TryFrom<GoalRow> for Goal {
    type Error = DatabaseError;

    fn try_from(row: GoalRow) -> Result<Self, Self::Error> {
        const ENTITY: &str = "Goal";

        Ok(Self {
            id: parse_uuid(ENTITY, "id", &row.id)?,
            user_id: parse_uuid(ENTITY, "user_id", &row.user_id)?,
            title: row.title,
            metric: row.metric,
            unit: row.unit,
            target_value: finite(ENTITY, "target_value", row.target_value)?,
            current_value: finite(ENTITY, "current_value", row.current_value)?,
            created_at: parse_timestamp(ENTITY, "created_at", &row.created_at)?,
            deadline: parse_timestamp(ENTITY, "deadline", &row.deadline)?,
            success_probability: finite(
                ENTITY,
                "success_probability",
                row.success_probability,
            )?,
            updated_at: parse_timestamp(ENTITY, "updated_at", &row.updated_at)?,
        })
    }
}

/// `goal_progress` row
#[derive(Debug, Clone, FromRow)]
pub struct GoalProgressRow {
    /// Observation time
    pub recorded_at: String,
    /// Observed value
    pub value: f64,
}

impl TryFrom<GoalProgressRow> for GoalProgressPoint {
    type Error = DatabaseError;

    fn try_from(row: GoalProgressRow) -> Result<Self, Self::Error> {
        const ENTITY: &str = "GoalProgress";

        Ok(Self {
            recorded_at: parse_timestamp(ENTITY, "recorded_at", &row.recorded_at)?,
            value: finite(ENTITY, "value", row.value)?,
        })
    }
}

/// `pattern_analyses` row
#[derive(Debug, Clone, FromRow)]
pub struct PatternAnalysisRow {
    /// Row id
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Producing run
    pub run_id: String,
    /// Leading variable
    pub first_variable: String,
    /// Following variable
    pub second_variable: String,
    /// Pearson coefficient
    pub correlation: f64,
    /// Confidence
    pub confidence: f64,
    /// Significance tier name
    pub significance: String,
    /// Lead in days
    pub lag_days: i64,
    /// Paired observations
    pub sample_size: i64,
    /// Insight text
    pub insight: String,
    /// Recommendation text
    pub recommendation: String,
    /// First analyzed day
    pub timeframe_start: String,
    /// Last analyzed day
    pub timeframe_end: String,
    /// Creation time
    pub created_at: String,
}

impl TryFrom<PatternAnalysisRow> for PatternAnalysis {
    type Error = DatabaseError;

    fn try_from(row: PatternAnalysisRow) -> Result<Self, Self::Error> {
        const ENTITY: &str = "PatternAnalysis";

        let significance = SignificanceTier::parse(&row.significance)
            .filter(|tier| tier.is_surfaced())
            .ok_or_else(|| {
                DatabaseError::invalid_row(
                    ENTITY,
                    format!("significance '{}' is not a surfaced tier", row.significance),
                )
            })?;
        let correlation = finite(ENTITY, "correlation", row.correlation)?;
        if !(-1.0..=1.0).contains(&correlation) {
            return Err(DatabaseError::invalid_row(
                ENTITY,
                format!("correlation {correlation} is outside [-1, 1]"),
            ));
        }

        Ok(Self {
            id: parse_uuid(ENTITY, "id", &row.id)?,
            user_id: parse_uuid(ENTITY, "user_id", &row.user_id)?,
            run_id: parse_uuid(ENTITY, "run_id", &row.run_id)?,
            first_variable: row.first_variable,
            second_variable: row.second_variable,
            correlation,
            confidence: finite(ENTITY, "confidence", row.confidence)?,
            significance,
            lag_days: non_negative(ENTITY, "lag_days", row.lag_days)?,
            sample_size: non_negative(ENTITY, "sample_size", row.sample_size)?,
            insight: row.insight,
            recommendation: row.recommendation,
            timeframe: Timeframe {
                start: parse_date(ENTITY, "timeframe_start", &row.timeframe_start)?,
                end: parse_date(ENTITY, "timeframe_end", &row.timeframe_end)?,
            },
            created_at: parse_timestamp(ENTITY, "created_at", &row.created_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn journal_row() -> JournalEntryRow {
        JournalEntryRow {
            id: Uuid::new_v4().to_string(),
            user_id: Uuid::new_v4().to_string(),
            recorded_at: "2025-03-01T07:30:00.000000Z".into(),
            workout: Some(r#"{"intensity": 72.5, "duration_minutes": 45.0}"#.into()),
            nutrition: None,
            biometrics: None,
            sleep_hours: Some(7.5),
            sleep_quality: Some(8),
            mood: Some(6),
            energy: None,
            motivation: None,
            stress: Some(3),
            soreness: None,
            notes: None,
            tags: r#"["deload"]"#.into(),
            created_at: "2025-03-01T07:30:00.000000Z".into(),
            updated_at: "2025-03-01T07:30:00.000000Z".into(),
        }
    }

    #[test]
    fn test_timestamp_format_sorts_chronologically() {
        let early = Utc.with_ymd_and_hms(2025, 1, 9, 23, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 1, 10, 1, 0, 0).unwrap();
        assert!(format_timestamp(early) < format_timestamp(late));
        assert_eq!(format_timestamp(early), "2025-01-09T23:00:00.000000Z");
    }

    #[test]
    fn test_journal_row_maps_blocks_and_ratings() {
        let entry = JournalEntry::try_from(journal_row()).unwrap();
        assert_eq!(entry.workout.unwrap().intensity, Some(72.5));
        assert_eq!(entry.sleep.unwrap().quality, Rating::new(8));
        assert_eq!(entry.subjective.stress, Rating::new(3));
        assert_eq!(entry.tags, vec!["deload".to_owned()]);
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        let mut row = journal_row();
        row.mood = Some(11);
        assert!(matches!(
            JournalEntry::try_from(row),
            Err(DatabaseError::InvalidRow { .. })
        ));
    }

    #[test]
    fn test_malformed_ids_and_timestamps_rejected() {
        let mut row = journal_row();
        row.id = "not-a-uuid".into();
        assert!(JournalEntry::try_from(row).is_err());

        let mut row = journal_row();
        row.recorded_at = "yesterday".into();
        assert!(JournalEntry::try_from(row).is_err());
    }

    #[test]
    fn test_low_significance_pattern_row_rejected() {
        let row = PatternAnalysisRow {
            id: Uuid::new_v4().to_string(),
            user_id: Uuid::new_v4().to_string(),
            run_id: Uuid::new_v4().to_string(),
            first_variable: "mood".into(),
            second_variable: "energy".into(),
            correlation: 0.2,
            confidence: 30.0,
            significance: "low".into(),
            lag_days: 0,
            sample_size: 12,
            insight: String::new(),
            recommendation: String::new(),
            timeframe_start: "2025-01-01".into(),
            timeframe_end: "2025-03-31".into(),
            created_at: "2025-03-31T12:00:00.000000Z".into(),
        };
        assert!(PatternAnalysis::try_from(row).is_err());
    }
}
