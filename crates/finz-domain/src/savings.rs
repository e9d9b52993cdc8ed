use serde::{Deserialize, Serialize};

use crate::common::YearMonth;

/// One month of observed savings plus the running total up to it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalSavingsPoint {
    pub month: YearMonth,
    pub monthly_savings: f64,
    pub cumulative_savings: f64,
}

/// A projected month. The connection point repeats the last historical
/// point so a rendered line stays continuous; it carries no prediction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub month: YearMonth,
    pub monthly_savings: f64,
    pub cumulative_savings: f64,
    #[serde(default)]
    pub is_connection: bool,
}

impl ForecastPoint {
    pub fn connection(last: &HistoricalSavingsPoint) -> Self {
        Self {
            month: last.month,
            monthly_savings: last.monthly_savings,
            cumulative_savings: last.cumulative_savings,
            is_connection: true,
        }
    }

    pub fn projected(month: YearMonth, monthly_savings: f64, cumulative_savings: f64) -> Self {
        Self {
            month,
            monthly_savings,
            cumulative_savings,
            is_connection: false,
        }
    }
}

/// Headline numbers shown next to the savings chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SavingsInsights {
    pub average_monthly_savings: f64,
    pub total_savings: f64,
    pub projected_total: Option<f64>,
    pub projected_growth_percent: Option<f64>,
    pub projected_at_target: Option<f64>,
}
