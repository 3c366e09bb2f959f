// ABOUTME: Ordinary least squares trend estimation over aligned daily series
// ABOUTME: Reports slope per day, fit quality, and a coarse rising/falling/flat direction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::alignment::AlignedSeries;
use crate::config::SignificanceThresholds;
use crate::correlation::pearson;
use serde::Serialize;

/// Least-squares fit of `y = slope·x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Regression {
    /// Change in y per unit of x
    pub slope: f64,
    /// y at x = 0
    pub intercept: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Pearson correlation between x and y
    pub correlation: f64,
    /// Points fitted
    pub sample_size: usize,
}

impl Regression {
    /// Fitted y at `x`
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Coarse direction of a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Values increase over the window
    Rising,
    /// Values decrease over the window
    Falling,
    /// No meaningful linear movement
    Flat,
}

/// Linear trend of one variable over its analysis window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendEstimate {
    /// Variable name
    pub variable: String,
    /// Change per day
    pub slope_per_day: f64,
    /// Fitted value on the window's first day
    pub intercept: f64,
    /// Fit quality
    pub r_squared: f64,
    /// Observed days fitted
    pub sample_size: usize,
    /// Direction classification
    pub direction: TrendDirection,
}

/// Statistical trend helpers
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Least-squares regression over `(x, y)` points
    ///
    /// Returns `None` for fewer than two points or when every x is identical.
    #[must_use]
    pub fn linear_regression(points: &[(f64, f64)]) -> Option<Regression> {
        if points.len() < 2 {
            return None;
        }

        let n = points.len() as f64;
        let sum_x = points.iter().map(|p| p.0).sum::<f64>();
        let sum_y = points.iter().map(|p| p.1).sum::<f64>();
        let sum_xx = points.iter().map(|p| p.0 * p.0).sum::<f64>();
        let sum_xy = points.iter().map(|p| p.0 * p.1).sum::<f64>();

        let mean_x = sum_x / n;
        let mean_y = sum_y / n;

        let variance_x = (n * mean_x).mul_add(-mean_x, sum_xx);
        if variance_x.abs() < f64::EPSILON {
            return None;
        }

        let covariance = (n * mean_x).mul_add(-mean_y, sum_xy);
        let slope = covariance / variance_x;
        let intercept = slope.mul_add(-mean_x, mean_y);

        let correlation = pearson(points);

        Some(Regression {
            slope,
            intercept,
            r_squared: correlation * correlation,
            correlation,
            sample_size: points.len(),
        })
    }

    /// Trend of `series` against day index over its observed days
    ///
    /// A fit whose time correlation does not exceed the medium significance threshold
    /// is reported as `Flat`.
    #[must_use]
    pub fn trend(
        series: &AlignedSeries,
        thresholds: &SignificanceThresholds,
    ) -> Option<TrendEstimate> {
        let points: Vec<(f64, f64)> = series
            .observations()
            .map(|(index, value)| (index as f64, value))
            .collect();
        let regression = Self::linear_regression(&points)?;

        let direction = if regression.correlation.abs() <= thresholds.medium {
            TrendDirection::Flat
        } else if regression.slope > 0.0 {
            TrendDirection::Rising
        } else {
            TrendDirection::Falling
        };

        Some(TrendEstimate {
            variable: series.variable().to_owned(),
            slope_per_day: regression.slope,
            intercept: regression.intercept,
            r_squared: regression.r_squared,
            sample_size: regression.sample_size,
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::DayWindow;
    use chrono::NaiveDate;

    #[test]
    fn test_regression_recovers_line() {
        let points: Vec<(f64, f64)> = (0..8)
            .map(|i| (f64::from(i), 2.0f64.mul_add(f64::from(i), 1.0)))
            .collect();
        let fit = TrendAnalyzer::linear_regression(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 1.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_regression_rejects_degenerate_x() {
        assert!(TrendAnalyzer::linear_regression(&[(1.0, 2.0)]).is_none());
        assert!(TrendAnalyzer::linear_regression(&[(1.0, 2.0), (1.0, 3.0)]).is_none());
    }

    #[test]
    fn test_trend_skips_gaps_and_classifies() {
        let end = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let window = DayWindow::ending_on(end, 6);
        let thresholds = SignificanceThresholds::default();

        let falling = AlignedSeries::from_daily_values(
            "body_weight_kg",
            window,
            &[Some(82.0), None, Some(81.0), Some(80.6), None, Some(79.9)],
        );
        let estimate = TrendAnalyzer::trend(&falling, &thresholds).unwrap();
        assert_eq!(estimate.direction, TrendDirection::Falling);
        assert_eq!(estimate.sample_size, 4);
        assert!(estimate.slope_per_day < 0.0);

        let flat = AlignedSeries::from_daily_values(
            "mood",
            window,
            &[Some(6.0), Some(6.0), Some(6.0), Some(6.0), Some(6.0), Some(6.0)],
        );
        let estimate = TrendAnalyzer::trend(&flat, &thresholds).unwrap();
        assert_eq!(estimate.direction, TrendDirection::Flat);
    }
}
