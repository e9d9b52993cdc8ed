//! End-to-end savings pipeline:
//! records -> history -> forecast -> per-goal analysis -> insights.

use chrono::NaiveDate;
use finz_config::Config;
use finz_core::{
    AggregationService, CurrencyFormatter, ForecastService, GoalService, InsightService,
};
use finz_domain::{
    ForecastMethod, ForecastPoint, GoalAnalysis, HistoricalSavingsPoint,
    MonthlyTransactionRecord, SavingsGoal, SavingsInsights, YearMonth,
};
use serde::Serialize;
use tracing::info;

use crate::errors::Result;

/// Where a goal sits on the savings chart: its target month at its target amount.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalMarker {
    pub month: YearMonth,
    pub target_amount: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalReport {
    pub goal: SavingsGoal,
    pub analysis: GoalAnalysis,
    pub marker: GoalMarker,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsReport {
    pub as_of: NaiveDate,
    pub method: ForecastMethod,
    pub historical: Vec<HistoricalSavingsPoint>,
    pub forecast: Vec<ForecastPoint>,
    pub goals: Vec<GoalReport>,
    /// Goal the insights panel is computed against.
    pub active_goal_id: Option<String>,
    pub insights: SavingsInsights,
}

impl SavingsReport {
    /// Runs the whole pipeline. `active` selects the goal used for
    /// insights by id or name; the first goal is used otherwise.
    pub fn build(
        records: &[MonthlyTransactionRecord],
        goals: &[SavingsGoal],
        active: Option<&str>,
        today: NaiveDate,
        config: &Config,
        formatter: &dyn CurrencyFormatter,
    ) -> Result<Self> {
        for goal in goals {
            GoalService::check_goal(goal)?;
        }
        let historical = AggregationService::aggregate(records);
        let forecast =
            ForecastService::forecast(&historical, config.forecast.periods, &config.forecast)?;

        let active_goal = match active {
            Some(key) => Some(GoalService::select_goal(goals, key)?),
            None => goals.first(),
        };

        let goal_reports: Vec<GoalReport> = goals
            .iter()
            .map(|goal| GoalReport {
                analysis: GoalService::analyze(
                    goal,
                    &historical,
                    today,
                    &config.analysis,
                    formatter,
                ),
                marker: GoalMarker {
                    month: goal.target_month(),
                    target_amount: goal.target_amount,
                },
                goal: goal.clone(),
            })
            .collect();

        let insights = InsightService::summarize(
            &historical,
            &forecast,
            active_goal,
            config.analysis.average_window,
        );

        info!(
            months = historical.len(),
            projected = forecast.len(),
            goals = goal_reports.len(),
            method = %config.forecast.method,
            "built savings report"
        );

        Ok(Self {
            as_of: today,
            method: config.forecast.method,
            historical,
            forecast,
            goals: goal_reports,
            active_goal_id: active_goal.map(|goal| goal.id.clone()),
            insights,
        })
    }

    pub fn active_goal(&self) -> Option<&GoalReport> {
        let id = self.active_goal_id.as_deref()?;
        self.goals.iter().find(|report| report.goal.id == id)
    }

    /// Forecast points without the connection point.
    pub fn projections(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.forecast.iter().filter(|point| !point.is_connection)
    }
}
