//! Tunable constants for forecasting and goal analysis.
//!
//! Every struct deserializes with `#[serde(default)]` so partial
//! configuration files only override the fields they mention.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ForecastMethod {
    /// Centered linear trend over a trailing window.
    #[default]
    LinearTrend,
    /// Level/trend/seasonal exponential smoothing.
    HoltWinters,
}

impl FromStr for ForecastMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "linear" | "linear-trend" | "trend" => Ok(ForecastMethod::LinearTrend),
            "holt-winters" | "holtwinters" | "hw" => Ok(ForecastMethod::HoltWinters),
            other => Err(format!("unknown forecast method `{other}`")),
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ForecastMethod::LinearTrend => "linear-trend",
            ForecastMethod::HoltWinters => "holt-winters",
        };
        f.write_str(label)
    }
}

/// How projected cumulative savings are derived from monthly predictions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CumulativeMode {
    /// `cumulative[k] = cumulative[k-1] + predicted[k]`.
    #[default]
    Running,
    /// `last_cumulative + predicted[k] * k`.
    StepScaled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinearTrendSettings {
    /// Trailing months used for the mean and slope. Also the minimum history.
    pub window: usize,
    /// Lower bound applied to every predicted month.
    pub floor: f64,
}

impl Default for LinearTrendSettings {
    fn default() -> Self {
        Self {
            window: 6,
            floor: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HoltWintersSettings {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    /// Months per season; 4 reads the history as quarterly.
    pub season_length: usize,
    pub min_points: usize,
    pub floor: f64,
}

impl Default for HoltWintersSettings {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.1,
            gamma: 0.2,
            season_length: 4,
            min_points: 3,
            floor: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForecastSettings {
    pub method: ForecastMethod,
    pub periods: usize,
    /// Longest horizon accepted, in months.
    pub max_periods: usize,
    pub cumulative: CumulativeMode,
    pub linear: LinearTrendSettings,
    pub holt_winters: HoltWintersSettings,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            method: ForecastMethod::default(),
            periods: 6,
            max_periods: 120,
            cumulative: CumulativeMode::default(),
            linear: LinearTrendSettings::default(),
            holt_winters: HoltWintersSettings::default(),
        }
    }
}

/// Where "current savings" comes from when analysing a goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SavingsSource {
    /// Last cumulative value of the aggregated history.
    #[default]
    History,
    /// The goal's own `current_amount`, treated as a manual override.
    GoalBalance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalSettings {
    pub savings_source: SavingsSource,
    pub average_window: usize,
    pub on_track_threshold: f64,
    pub moderate_risk_threshold: f64,
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self {
            savings_source: SavingsSource::default(),
            average_window: 6,
            on_track_threshold: 80.0,
            moderate_risk_threshold: 50.0,
        }
    }
}

/// Bounds enforced when a goal is created, plus timeline rating bands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalLimits {
    pub min_target: f64,
    pub max_target: f64,
    pub min_months: i32,
    pub max_months: i32,
    pub max_monthly_requirement: f64,
    pub excellent_monthly: f64,
    pub good_monthly: f64,
    pub challenging_monthly: f64,
}

impl Default for GoalLimits {
    fn default() -> Self {
        Self {
            min_target: 1_000.0,
            max_target: 10_000_000.0,
            min_months: 1,
            max_months: 60,
            max_monthly_requirement: 100_000.0,
            excellent_monthly: 15_000.0,
            good_monthly: 30_000.0,
            challenging_monthly: 50_000.0,
        }
    }
}
