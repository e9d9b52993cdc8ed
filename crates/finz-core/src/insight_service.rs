use finz_domain::{ForecastPoint, HistoricalSavingsPoint, SavingsGoal, SavingsInsights};

use crate::AggregationService;

pub struct InsightService;

impl InsightService {
    /// Summarizes history and forecast for the insights panel.
    /// Connection points never count as projections.
    pub fn summarize(
        historical: &[HistoricalSavingsPoint],
        forecast: &[ForecastPoint],
        goal: Option<&SavingsGoal>,
        window: usize,
    ) -> SavingsInsights {
        let total_savings = AggregationService::current_savings(historical);
        let mut projected = forecast.iter().filter(|point| !point.is_connection);
        let projected_total = projected
            .clone()
            .last()
            .map(|point| point.cumulative_savings);
        let projected_growth_percent = projected_total.and_then(|total| {
            if total_savings.abs() < f64::EPSILON {
                None
            } else {
                Some((total - total_savings) / total_savings.abs() * 100.0)
            }
        });
        let projected_at_target = goal.and_then(|goal| {
            let month = goal.target_month();
            projected
                .find(|point| point.month == month)
                .map(|point| point.cumulative_savings)
        });

        SavingsInsights {
            average_monthly_savings: AggregationService::trailing_average(historical, window),
            total_savings,
            projected_total,
            projected_growth_percent,
            projected_at_target,
        }
    }
}
