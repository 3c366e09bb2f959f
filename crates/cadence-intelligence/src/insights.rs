// ABOUTME: Turns surfaced correlations into ranked, deduplicated insight and recommendation text
// ABOUTME: Registered pair templates with a generic fallback for unknown variable pairs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::correlation::PairCorrelation;
use crate::engine::RunContext;
use cadence_core::constants::signals::{
    BODY_FAT_PERCENT, BODY_WEIGHT_KG, CARBS_GRAMS, ENERGY, FAT_GRAMS, FITNESS_TEST_PREFIX,
    HRV_MS, HYDRATION_LITERS, MOOD, MOTIVATION, PROTEIN_GRAMS, RIR, RPE, SLEEP_HOURS,
    SLEEP_QUALITY, SORENESS, STRESS, WORKOUT_DURATION_MINUTES, WORKOUT_INTENSITY,
    WORKOUT_VOLUME_KG,
};
use cadence_core::models::{PatternAnalysis, SignificanceTier, Timeframe};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Human-readable label for a variable name
#[must_use]
pub fn display_name(variable: &str) -> String {
    if let Some(metric) = variable.strip_prefix(FITNESS_TEST_PREFIX) {
        return format!("{} test result", metric.replace('_', " "));
    }

    let label = match variable {
        SLEEP_HOURS => "sleep duration",
        WORKOUT_DURATION_MINUTES => "workout duration",
        WORKOUT_VOLUME_KG => "training volume",
        PROTEIN_GRAMS => "protein intake",
        CARBS_GRAMS => "carbohydrate intake",
        FAT_GRAMS => "fat intake",
        HYDRATION_LITERS => "hydration",
        BODY_WEIGHT_KG => "body weight",
        BODY_FAT_PERCENT => "body fat",
        HRV_MS => "HRV",
        RPE => "RPE",
        RIR => "RIR",
        other => return other.replace('_', " "),
    };
    label.to_owned()
}

/// Insight and recommendation text for one variable pair.
///
/// Text may use `{first}`, `{First}`, `{second}`, `{strength}` and `{when}`
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightTemplate {
    /// Insight when the variables move together
    pub positive_insight: String,
    /// Insight when the variables move in opposite directions
    pub negative_insight: String,
    /// Recommendation for a positive relationship
    pub positive_recommendation: String,
    /// Recommendation for a negative relationship
    pub negative_recommendation: String,
}

impl InsightTemplate {
    /// Template from four text fragments
    #[must_use]
    pub fn new(
        positive_insight: impl Into<String>,
        negative_insight: impl Into<String>,
        positive_recommendation: impl Into<String>,
        negative_recommendation: impl Into<String>,
    ) -> Self {
        Self {
            positive_insight: positive_insight.into(),
            negative_insight: negative_insight.into(),
            positive_recommendation: positive_recommendation.into(),
            negative_recommendation: negative_recommendation.into(),
        }
    }

    /// Fallback used for pairs without a registered template
    #[must_use]
    pub fn generic() -> Self {
        Self::new(
            "{First} is {strength} positively correlated with {second}{when}.",
            "{First} is {strength} negatively correlated with {second}{when}.",
            "Keep logging both; days with more {first} tend to come with more {second}{when}.",
            "Keep logging both; days with more {first} tend to come with less {second}{when}.",
        )
    }

    fn render(&self, correlation: &PairCorrelation) -> (String, String) {
        let (insight, recommendation) = if correlation.is_positive() {
            (&self.positive_insight, &self.positive_recommendation)
        } else {
            (&self.negative_insight, &self.negative_recommendation)
        };

        let first = display_name(&correlation.first);
        let second = display_name(&correlation.second);
        let strength = strength_word(correlation.significance);
        let when = lag_phrase(correlation.lag_days);

        let fill = |text: &str| {
            text.replace("{First}", &capitalize(&first))
                .replace("{first}", &first)
                .replace("{second}", &second)
                .replace("{strength}", strength)
                .replace("{when}", &when)
        };
        (fill(insight), fill(recommendation))
    }
}

/// Registry of templates keyed by `(leading, following)` variable
#[derive(Debug, Clone, Default)]
pub struct InsightTemplates {
    templates: HashMap<(String, String), InsightTemplate>,
    fallback: Option<InsightTemplate>,
}

impl InsightTemplates {
    /// Templates for the common journal relationships
    #[must_use]
    pub fn standard() -> Self {
        let mut templates = Self {
            fallback: Some(InsightTemplate::generic()),
            ..Self::default()
        };

        templates.register(
            SLEEP_QUALITY,
            WORKOUT_INTENSITY,
            InsightTemplate::new(
                "Better sleep quality is {strength} associated with harder training{when}.",
                "Better sleep quality is {strength} associated with lighter training{when}.",
                "Protect your sleep before key sessions; your hardest workouts follow your best nights.",
                "Check whether intense sessions are disrupting sleep; consider moving them earlier in the day.",
            ),
        );
        templates.register(
            SLEEP_QUALITY,
            ENERGY,
            InsightTemplate::new(
                "Your energy is {strength} higher after better-quality sleep{when}.",
                "Your energy is {strength} lower after nights you rate as better sleep{when}.",
                "Keep a consistent sleep routine; it shows up directly in how energetic you feel.",
                "Review how you rate sleep quality; the relationship with energy runs against expectations.",
            ),
        );
        templates.register(
            SLEEP_HOURS,
            ENERGY,
            InsightTemplate::new(
                "Longer sleep is {strength} linked to higher energy{when}.",
                "Longer sleep is {strength} linked to lower energy{when}.",
                "Aim for your longer sleep nights before demanding days.",
                "Long nights may reflect fatigue; watch for accumulated training stress.",
            ),
        );
        templates.register(
            STRESS,
            SLEEP_QUALITY,
            InsightTemplate::new(
                "Higher stress is {strength} associated with better sleep quality{when}.",
                "Higher stress is {strength} associated with poorer sleep quality{when}.",
                "Stress has not hurt your sleep so far; keep the habits that protect it.",
                "On high-stress days, build in a wind-down routine to protect your sleep.",
            ),
        );
        templates.register(
            HYDRATION_LITERS,
            ENERGY,
            InsightTemplate::new(
                "Better hydration is {strength} associated with higher energy{when}.",
                "Higher fluid intake is {strength} associated with lower energy{when}.",
                "Keep a water bottle close; well-hydrated days are your more energetic ones.",
                "You may be drinking more on draining days; check hydration before fatigue sets in.",
            ),
        );
        templates.register(
            PROTEIN_GRAMS,
            SORENESS,
            InsightTemplate::new(
                "Higher protein intake is {strength} associated with more soreness{when}.",
                "Higher protein intake is {strength} associated with less soreness{when}.",
                "You may be eating more protein on hard days; keep intake steady across the week.",
                "Keep protein intake high around hard sessions to support recovery.",
            ),
        );
        templates.register(
            MOOD,
            WORKOUT_INTENSITY,
            InsightTemplate::new(
                "A better mood is {strength} associated with harder training{when}.",
                "A better mood is {strength} associated with lighter training{when}.",
                "Schedule demanding sessions on days you feel good.",
                "Lighter sessions seem to suit good days; check whether hard training is affecting your mood.",
            ),
        );
        templates.register(
            MOTIVATION,
            WORKOUT_DURATION_MINUTES,
            InsightTemplate::new(
                "Higher motivation is {strength} associated with longer workouts{when}.",
                "Higher motivation is {strength} associated with shorter workouts{when}.",
                "Use high-motivation days for your longer sessions.",
                "Motivated days produce shorter, focused sessions; lean into quality over duration.",
            ),
        );
        templates.register(
            WORKOUT_VOLUME_KG,
            SORENESS,
            InsightTemplate::new(
                "Higher training volume is {strength} associated with more soreness{when}.",
                "Higher training volume is {strength} associated with less soreness{when}.",
                "Ramp volume gradually and plan recovery after your biggest sessions.",
                "Your body is adapting to volume; progress it steadily.",
            ),
        );

        templates
    }

    /// Register the template for `leading` affecting `following`
    pub fn register(
        &mut self,
        leading: impl Into<String>,
        following: impl Into<String>,
        template: InsightTemplate,
    ) {
        self.templates
            .insert((leading.into(), following.into()), template);
    }

    /// Replace the fallback template
    pub fn set_fallback(&mut self, template: InsightTemplate) {
        self.fallback = Some(template);
    }

    /// Template for a correlation.
    ///
    /// The registered direction matches exactly; same-day relationships also match the
    /// reverse direction. Unknown pairs get the fallback.
    #[must_use]
    pub fn lookup(&self, correlation: &PairCorrelation) -> Option<&InsightTemplate> {
        let forward = (correlation.first.clone(), correlation.second.clone());
        self.templates
            .get(&forward)
            .or_else(|| {
                (correlation.lag_days == 0)
                    .then(|| (forward.1.clone(), forward.0.clone()))
                    .and_then(|reverse| self.templates.get(&reverse))
            })
            .or(self.fallback.as_ref())
    }
}

/// Builds pattern rows from surfaced correlations
pub struct InsightSynthesizer {
    templates: InsightTemplates,
    max_patterns: usize,
}

impl InsightSynthesizer {
    /// Synthesizer keeping at most `max_patterns` rows per run
    #[must_use]
    pub const fn new(templates: InsightTemplates, max_patterns: usize) -> Self {
        Self {
            templates,
            max_patterns,
        }
    }

    /// Insight and recommendation for one correlation
    #[must_use]
    pub fn describe(&self, correlation: &PairCorrelation) -> (String, String) {
        self.templates.lookup(correlation).map_or_else(
            || InsightTemplate::generic().render(correlation),
            |template| template.render(correlation),
        )
    }

    /// Deduplicate, rank, and render surfaced correlations as pattern rows.
    ///
    /// Correlations sharing an unordered variable pair and sign collapse into the
    /// strongest one. Rows are ordered by tier, then confidence, then names.
    #[must_use]
    pub fn synthesize(
        &self,
        correlations: &[PairCorrelation],
        context: &RunContext,
        timeframe: Timeframe,
    ) -> Vec<PatternAnalysis> {
        let mut strongest: BTreeMap<((&str, &str), bool), &PairCorrelation> = BTreeMap::new();
        for correlation in correlations
            .iter()
            .filter(|c| c.significance.is_surfaced())
        {
            let key = (correlation.unordered_key(), correlation.is_positive());
            let replaces = strongest
                .get(&key)
                .map_or(true, |existing| rank(correlation, existing) == Ordering::Less);
            if replaces {
                strongest.insert(key, correlation);
            }
        }

        let mut ranked: Vec<&PairCorrelation> = strongest.into_values().collect();
        ranked.sort_by(|a, b| rank(a, b));
        ranked.truncate(self.max_patterns);

        ranked
            .into_iter()
            .map(|correlation| {
                let (insight, recommendation) = self.describe(correlation);
                PatternAnalysis {
                    id: Uuid::new_v4(),
                    user_id: context.user_id,
                    run_id: context.run_id,
                    first_variable: correlation.first.clone(),
                    second_variable: correlation.second.clone(),
                    correlation: correlation.correlation,
                    confidence: correlation.confidence,
                    significance: correlation.significance,
                    lag_days: correlation.lag_days,
                    sample_size: correlation.sample_size,
                    insight,
                    recommendation,
                    timeframe,
                    created_at: context.created_at,
                }
            })
            .collect()
    }
}

/// `Less` when `a` ranks ahead of `b`
fn rank(a: &PairCorrelation, b: &PairCorrelation) -> Ordering {
    b.significance
        .cmp(&a.significance)
        .then_with(|| b.confidence.total_cmp(&a.confidence))
        .then_with(|| a.first.cmp(&b.first))
        .then_with(|| a.second.cmp(&b.second))
        .then_with(|| a.lag_days.cmp(&b.lag_days))
}

const fn strength_word(tier: SignificanceTier) -> &'static str {
    match tier {
        SignificanceTier::High => "strongly",
        SignificanceTier::Medium => "moderately",
        SignificanceTier::Low => "weakly",
    }
}

fn lag_phrase(lag_days: u32) -> String {
    match lag_days {
        0 => String::new(),
        1 => " the next day".to_owned(),
        days => format!(" {days} days later"),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn correlation(
        first: &str,
        second: &str,
        r: f64,
        confidence: f64,
        lag: u32,
    ) -> PairCorrelation {
        let significance = if r.abs() > 0.5 {
            SignificanceTier::High
        } else if r.abs() > 0.3 {
            SignificanceTier::Medium
        } else {
            SignificanceTier::Low
        };
        PairCorrelation {
            first: first.to_owned(),
            second: second.to_owned(),
            correlation: r,
            confidence,
            significance,
            lag_days: lag,
            sample_size: 20,
        }
    }

    fn context() -> RunContext {
        RunContext {
            user_id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    fn timeframe() -> Timeframe {
        let end = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
        Timeframe {
            start: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            end,
        }
    }

    #[test]
    fn test_registered_and_generic_text() {
        let synthesizer = InsightSynthesizer::new(InsightTemplates::standard(), 20);

        let (insight, _) =
            synthesizer.describe(&correlation(STRESS, SLEEP_QUALITY, -0.7, 80.0, 0));
        assert_eq!(
            insight,
            "Higher stress is strongly associated with poorer sleep quality."
        );

        let (insight, recommendation) =
            synthesizer.describe(&correlation("calories", "rpe", 0.4, 50.0, 2));
        assert_eq!(
            insight,
            "Calories is moderately positively correlated with RPE 2 days later."
        );
        assert!(recommendation.contains("more calories"));
    }

    #[test]
    fn test_same_day_template_matches_reverse_order() {
        let synthesizer = InsightSynthesizer::new(InsightTemplates::standard(), 20);
        let (insight, _) =
            synthesizer.describe(&correlation(ENERGY, SLEEP_QUALITY, 0.8, 90.0, 0));
        assert!(insight.starts_with("Your energy is strongly higher"));

        let (lagged, _) =
            synthesizer.describe(&correlation(SLEEP_QUALITY, ENERGY, 0.8, 90.0, 1));
        assert!(lagged.ends_with("the next day."));
    }

    #[test]
    fn test_deduplicates_and_ranks() {
        let synthesizer = InsightSynthesizer::new(InsightTemplates::standard(), 20);
        let input = vec![
            correlation(MOOD, ENERGY, 0.4, 60.0, 0),
            correlation(ENERGY, MOOD, 0.45, 62.0, 1),
            correlation(SLEEP_QUALITY, WORKOUT_INTENSITY, 0.9, 92.0, 0),
            correlation(STRESS, SORENESS, -0.6, 70.0, 0),
            correlation("calories", "carbs_grams", 0.2, 30.0, 0),
        ];

        let rows = synthesizer.synthesize(&input, &context(), timeframe());
        let pairs: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.first_variable.as_str(), r.second_variable.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                (SLEEP_QUALITY, WORKOUT_INTENSITY),
                (STRESS, SORENESS),
                (ENERGY, MOOD),
            ]
        );
        assert!(rows.iter().all(|r| !r.insight.is_empty() && !r.recommendation.is_empty()));
    }

    #[test]
    fn test_truncates_to_limit() {
        let synthesizer = InsightSynthesizer::new(InsightTemplates::standard(), 1);
        let input = vec![
            correlation(MOOD, ENERGY, 0.4, 60.0, 0),
            correlation(STRESS, SORENESS, -0.6, 70.0, 0),
        ];
        let rows = synthesizer.synthesize(&input, &context(), timeframe());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].first_variable, STRESS);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(display_name(SLEEP_QUALITY), "sleep quality");
        assert_eq!(display_name(HRV_MS), "HRV");
        assert_eq!(display_name("fitness_test.vo2_max"), "vo2 max test result");
    }
}
