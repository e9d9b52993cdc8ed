//! Savings goals and the derived, render-time analysis of them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, YearMonth};

/// A user-defined savings target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub current_amount: f64,
}

impl SavingsGoal {
    /// Creates a goal with a fresh identifier and nothing saved yet.
    pub fn new(name: impl Into<String>, target_amount: f64, target_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            target_amount,
            target_date,
            current_amount: 0.0,
        }
    }

    pub fn target_month(&self) -> YearMonth {
        YearMonth::from_date(self.target_date)
    }
}

impl Displayable for SavingsGoal {
    fn display_label(&self) -> String {
        format!("{} (due {})", self.name, self.target_month().long_label())
    }
}

/// Raw goal-creation input before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub name: String,
    pub target_amount: f64,
    pub target_month: YearMonth,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    Achieved,
    Overdue,
    OnTrack,
    ModerateRisk,
    AtRisk,
}

impl GoalStatus {
    /// Badge text shown next to a goal.
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::Achieved => "Goal Achieved!",
            GoalStatus::Overdue => "Overdue",
            GoalStatus::OnTrack => "On Track",
            GoalStatus::ModerateRisk => "Moderate Risk",
            GoalStatus::AtRisk => "At Risk",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GoalStatus::Achieved => "achieved",
            GoalStatus::Overdue => "overdue",
            GoalStatus::OnTrack => "on-track",
            GoalStatus::ModerateRisk => "moderate-risk",
            GoalStatus::AtRisk => "at-risk",
        };
        f.write_str(label)
    }
}

/// Ephemeral result of comparing a goal with the savings history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalAnalysis {
    pub status: GoalStatus,
    pub likelihood_percent: u8,
    pub message: String,
    pub recommendation: String,
    pub current_savings: f64,
    pub remaining_amount: f64,
    pub months_remaining: u32,
    pub required_monthly_savings: f64,
    pub average_monthly_savings: f64,
    pub progress_percent: f64,
}

/// How demanding a goal's monthly requirement is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimelineRating {
    Excellent,
    Good,
    Challenging,
    Unrealistic,
}

impl TimelineRating {
    pub fn message(&self) -> &'static str {
        match self {
            TimelineRating::Excellent => "Excellent timeline! Very achievable.",
            TimelineRating::Good => "Good timeline - realistic with discipline.",
            TimelineRating::Challenging => "Challenging but possible with strict budgeting.",
            TimelineRating::Unrealistic => "Consider extending timeline for better success.",
        }
    }
}

impl fmt::Display for TimelineRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimelineRating::Excellent => "excellent",
            TimelineRating::Good => "good",
            TimelineRating::Challenging => "challenging",
            TimelineRating::Unrealistic => "unrealistic",
        };
        f.write_str(label)
    }
}
