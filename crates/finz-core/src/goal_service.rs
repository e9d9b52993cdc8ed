//! Goal achievability scoring, goal-creation validation, and timeline rating.

use chrono::NaiveDate;
use finz_domain::{
    GoalAnalysis, GoalDraft, GoalLimits, GoalSettings, GoalStatus, HistoricalSavingsPoint,
    SavingsGoal, SavingsSource, TimelineRating, YearMonth,
};
use tracing::debug;

use crate::{AggregationService, CoreError, CurrencyFormatter};

/// Figures every status decision is made from.
#[derive(Debug, Clone, Copy)]
struct GoalFigures {
    current: f64,
    target: f64,
    remaining: f64,
    months: u32,
    required: f64,
    average: f64,
}

pub struct GoalService;

impl GoalService {
    /// Scores `goal` against the savings history as of `today`.
    pub fn analyze(
        goal: &SavingsGoal,
        historical: &[HistoricalSavingsPoint],
        today: NaiveDate,
        settings: &GoalSettings,
        formatter: &dyn CurrencyFormatter,
    ) -> GoalAnalysis {
        let current = match settings.savings_source {
            SavingsSource::History => AggregationService::current_savings(historical),
            SavingsSource::GoalBalance => goal.current_amount,
        };
        let months = Self::months_remaining(today, goal.target_date);
        let remaining = (goal.target_amount - current).max(0.0);
        let required = if months > 0 {
            remaining / months as f64
        } else {
            remaining
        };
        let figures = GoalFigures {
            current,
            target: goal.target_amount,
            remaining,
            months,
            required,
            average: AggregationService::trailing_average(historical, settings.average_window),
        };

        let (status, likelihood) = Self::classify(&figures, settings);
        debug!(
            goal = %goal.name,
            %status,
            likelihood,
            required = figures.required,
            average = figures.average,
            "analyzed goal"
        );
        let (message, recommendation) = Self::narrate(status, &figures, formatter);

        GoalAnalysis {
            status,
            likelihood_percent: likelihood.round().clamp(0.0, 100.0) as u8,
            message,
            recommendation,
            current_savings: figures.current,
            remaining_amount: figures.remaining,
            months_remaining: figures.months,
            required_monthly_savings: figures.required,
            average_monthly_savings: figures.average,
            progress_percent: Self::progress_percent(figures.current, figures.target),
        }
    }

    /// Whole calendar months from `today` to `target`, never negative.
    pub fn months_remaining(today: NaiveDate, target: NaiveDate) -> u32 {
        YearMonth::from_date(today)
            .months_until(YearMonth::from_date(target))
            .max(0) as u32
    }

    /// Share of the target already saved, within `[0, 100]`.
    pub fn progress_percent(current: f64, target: f64) -> f64 {
        if target <= 0.0 {
            return 100.0;
        }
        (current / target * 100.0).clamp(0.0, 100.0)
    }

    fn classify(figures: &GoalFigures, settings: &GoalSettings) -> (GoalStatus, f64) {
        if figures.current >= figures.target {
            return (GoalStatus::Achieved, 100.0);
        }
        if figures.months == 0 {
            return (GoalStatus::Overdue, 0.0);
        }
        let ratio = figures.average / figures.required;
        if figures.required <= 0.0 || !ratio.is_finite() {
            return (GoalStatus::OnTrack, 100.0);
        }
        let likelihood = (ratio * 100.0).clamp(0.0, 100.0);
        let status = if likelihood >= settings.on_track_threshold {
            GoalStatus::OnTrack
        } else if likelihood >= settings.moderate_risk_threshold {
            GoalStatus::ModerateRisk
        } else {
            GoalStatus::AtRisk
        };
        (status, likelihood)
    }

    fn narrate(
        status: GoalStatus,
        figures: &GoalFigures,
        formatter: &dyn CurrencyFormatter,
    ) -> (String, String) {
        let gap = (figures.required - figures.average).round();
        match status {
            GoalStatus::Achieved => (
                "Congratulations! You've successfully reached your savings goal.".into(),
                "Consider setting a new goal or investing your savings for growth.".into(),
            ),
            GoalStatus::Overdue => (
                "The target date has passed and the goal hasn't been achieved.".into(),
                "Consider extending the deadline or adjusting the target amount.".into(),
            ),
            GoalStatus::OnTrack => (
                "You're saving well! At your current rate, you're likely to reach this goal."
                    .into(),
                "Keep up the great work! Consider automating your savings to maintain consistency."
                    .into(),
            ),
            GoalStatus::ModerateRisk => (
                "You might reach this goal, but it requires some adjustments.".into(),
                format!(
                    "Try to increase your monthly savings by {} to stay on track.",
                    formatter.format_amount(gap)
                ),
            ),
            GoalStatus::AtRisk => {
                let message =
                    "This goal is challenging to achieve with your current savings rate.".into();
                let recommendation = if figures.average > 0.0 {
                    let extension =
                        (figures.remaining / figures.average - figures.months as f64).ceil();
                    format!(
                        "Consider increasing monthly savings by {} or extending the deadline by {} months.",
                        formatter.format_amount(gap),
                        extension.max(1.0) as u64
                    )
                } else {
                    format!(
                        "Consider increasing monthly savings by {}; at your current savings rate a later deadline alone will not close the gap.",
                        formatter.format_amount(gap)
                    )
                };
                (message, recommendation)
            }
        }
    }

    /// Checks a stored goal before it is analysed. Past due dates are
    /// allowed; they are reported as overdue.
    pub fn check_goal(goal: &SavingsGoal) -> Result<(), CoreError> {
        let mut problems = Vec::new();
        if goal.name.trim().is_empty() {
            problems.push(format!("goal `{}` has no name", goal.id));
        }
        if !goal.target_amount.is_finite() || goal.target_amount <= 0.0 {
            problems.push(format!(
                "goal `{}` needs a positive target amount (got {})",
                goal.id, goal.target_amount
            ));
        }
        if !goal.current_amount.is_finite() {
            problems.push(format!("goal `{}` has a non-numeric current amount", goal.id));
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(problems))
        }
    }

    /// Collects every problem with a goal-creation request. Empty means valid.
    pub fn validate_draft(
        draft: &GoalDraft,
        today: NaiveDate,
        limits: &GoalLimits,
        formatter: &dyn CurrencyFormatter,
    ) -> Vec<String> {
        let mut errors = Vec::new();

        if draft.name.trim().is_empty() {
            errors.push("Goal name is required".to_string());
        }

        let amount = draft.target_amount;
        if !amount.is_finite() || amount <= 0.0 {
            errors.push("Please enter a valid target amount".to_string());
        } else if amount < limits.min_target {
            errors.push(format!(
                "Target amount should be at least {}",
                formatter.format_amount(limits.min_target)
            ));
        } else if amount > limits.max_target {
            errors.push(format!(
                "Target amount seems unrealistic (max {})",
                formatter.format_amount(limits.max_target)
            ));
        }

        let months = YearMonth::from_date(today).months_until(draft.target_month);
        if months <= 0 {
            errors.push("Target date must be in the future".to_string());
        } else if months < limits.min_months {
            errors.push(format!(
                "Target date should be at least {} month(s) away",
                limits.min_months
            ));
        } else if months > limits.max_months {
            errors.push(format!(
                "Target date should be within {} months for realistic planning",
                limits.max_months
            ));
        }

        if amount.is_finite() && amount > 0.0 && months > 0 {
            let monthly = amount / months as f64;
            if monthly > limits.max_monthly_requirement {
                errors.push(format!(
                    "This goal requires saving {}/month - consider extending the timeline",
                    formatter.format_amount(monthly)
                ));
            }
        }

        errors
    }

    /// Validates `draft` and turns it into a goal due on the first day of
    /// its target month.
    pub fn create_goal(
        draft: &GoalDraft,
        today: NaiveDate,
        limits: &GoalLimits,
        formatter: &dyn CurrencyFormatter,
    ) -> Result<SavingsGoal, CoreError> {
        let errors = Self::validate_draft(draft, today, limits, formatter);
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }
        Ok(SavingsGoal::new(
            draft.name.trim(),
            draft.target_amount,
            draft.target_month.first_day(),
        ))
    }

    pub fn timeline_rating(
        amount: f64,
        target_month: YearMonth,
        today: NaiveDate,
        limits: &GoalLimits,
    ) -> Option<TimelineRating> {
        let months = YearMonth::from_date(today).months_until(target_month);
        if months <= 0 || amount.is_nan() || amount <= 0.0 {
            return None;
        }
        let monthly = amount / months as f64;
        Some(if monthly <= limits.excellent_monthly {
            TimelineRating::Excellent
        } else if monthly <= limits.good_monthly {
            TimelineRating::Good
        } else if monthly <= limits.challenging_monthly {
            TimelineRating::Challenging
        } else {
            TimelineRating::Unrealistic
        })
    }

    /// Finds a goal by exact id, then by case-insensitive name.
    pub fn select_goal<'a>(
        goals: &'a [SavingsGoal],
        key: &str,
    ) -> Result<&'a SavingsGoal, CoreError> {
        let key = key.trim();
        goals
            .iter()
            .find(|goal| goal.id == key)
            .or_else(|| goals.iter().find(|goal| goal.name.eq_ignore_ascii_case(key)))
            .ok_or_else(|| CoreError::GoalNotFound(key.to_string()))
    }
}
