use chrono::NaiveDate;
use finz_domain::{
    CashEntry, CumulativeMode, ForecastMethod, ForecastSettings, GoalDraft, GoalLimits,
    GoalSettings, GoalStatus, HistoricalSavingsPoint, HoltWintersSettings, LinearTrendSettings,
    MonthlyTransactionRecord, SavingsGoal, SavingsSource, TimelineRating, Transaction,
    TransactionKind, YearMonth,
};

use crate::{
    AggregationService, CoreError, CurrencyFormatter, Forecaster, ForecastService, GoalService,
    HoltWintersForecaster, InsightService, LinearTrendForecaster,
};

fn month(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Builds a history ending in September 2025 from monthly savings values.
fn history(values: &[f64]) -> Vec<HistoricalSavingsPoint> {
    let last = month(2025, 9);
    let start = last.add_months(-(values.len() as i32 - 1));
    let records: Vec<MonthlyTransactionRecord> = values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let m = start.add_months(idx as i32);
            let record = MonthlyTransactionRecord::new(m);
            if *value >= 0.0 {
                record.with_inflow(CashEntry::new(*value, "net", m.first_day()))
            } else {
                record.with_outflow(CashEntry::new(-value, "net", m.first_day()))
            }
        })
        .collect();
    AggregationService::aggregate(&records)
}

fn goal(target_amount: f64, target_date: NaiveDate) -> SavingsGoal {
    SavingsGoal {
        id: "goal-1".into(),
        name: "Emergency Fund".into(),
        target_amount,
        target_date,
        current_amount: 0.0,
    }
}

/// Whole rupees with thousands separators, enough to read recommendations.
struct RupeeFormatter;

impl CurrencyFormatter for RupeeFormatter {
    fn format_amount(&self, amount: f64) -> String {
        let digits = format!("{:.0}", amount.round().abs());
        let grouped: Vec<String> = digits
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect();
        let sign = if amount.round() < 0.0 { "-" } else { "" };
        format!("{sign}₹{}", grouped.join(","))
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn aggregate_carries_running_total() {
    let records = vec![
        MonthlyTransactionRecord::new(month(2025, 1))
            .with_inflow(CashEntry::new(50_000.0, "Salary", date(2025, 1, 5)))
            .with_outflow(CashEntry::new(30_000.0, "Rent", date(2025, 1, 1)))
            .with_outflow(CashEntry::new(5_000.0, "Food", date(2025, 1, 20))),
        MonthlyTransactionRecord::new(month(2025, 2))
            .with_inflow(CashEntry::new(40_000.0, "Salary", date(2025, 2, 5)))
            .with_outflow(CashEntry::new(45_000.0, "Travel", date(2025, 2, 12))),
        MonthlyTransactionRecord::new(month(2025, 3))
            .with_inflow(CashEntry::new(52_000.0, "Salary", date(2025, 3, 5))),
    ];

    let points = AggregationService::aggregate(&records);

    assert_eq!(points.len(), 3);
    assert_eq!(points[0].monthly_savings, 15_000.0);
    assert_eq!(points[0].cumulative_savings, 15_000.0);
    assert_eq!(points[1].monthly_savings, -5_000.0);
    assert_eq!(points[1].cumulative_savings, 10_000.0);
    assert_eq!(points[2].cumulative_savings, 62_000.0);
    for pair in points.windows(2) {
        assert_eq!(
            pair[1].cumulative_savings,
            pair[0].cumulative_savings + pair[1].monthly_savings
        );
    }
    let months: Vec<_> = points.iter().map(|p| p.month).collect();
    assert_eq!(months, vec![month(2025, 1), month(2025, 2), month(2025, 3)]);
}

#[test]
fn aggregate_empty_input_yields_empty_output() {
    assert!(AggregationService::aggregate(&[]).is_empty());
}

#[test]
fn aggregate_keeps_input_order() {
    let records = vec![
        MonthlyTransactionRecord::new(month(2025, 3)),
        MonthlyTransactionRecord::new(month(2025, 1)),
    ];
    let points = AggregationService::aggregate(&records);
    assert_eq!(points[0].month, month(2025, 3));
    assert_eq!(points[1].month, month(2025, 1));
}

#[test]
fn group_transactions_buckets_by_month() {
    let txn = |id, d, amount: f64, kind| Transaction {
        id,
        date: d,
        description: format!("txn {id}"),
        category: "General".into(),
        amount,
        kind,
    };
    let transactions = vec![
        txn(1, date(2025, 9, 10), -450.0, TransactionKind::Outflow),
        txn(2, date(2025, 8, 7), 50_000.0, TransactionKind::Inflow),
        txn(3, date(2025, 9, 7), 50_000.0, TransactionKind::Inflow),
    ];

    let records = AggregationService::group_transactions(&transactions);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].month, month(2025, 8));
    assert_eq!(records[1].month, month(2025, 9));
    assert_eq!(records[1].total_outflow(), 450.0);
    assert_eq!(records[1].net_savings(), 49_550.0);
}

#[test]
fn trailing_average_uses_available_points() {
    let points = history(&[1_000.0, 2_000.0, 3_000.0]);
    assert_close(AggregationService::trailing_average(&points, 6), 2_000.0);
    assert_close(AggregationService::trailing_average(&points, 2), 2_500.0);
    assert_eq!(AggregationService::trailing_average(&[], 6), 0.0);
}

#[test]
fn linear_trend_matches_centered_slope() {
    let estimate = LinearTrendForecaster::estimate(&[
        10_000.0, 12_000.0, 11_000.0, 13_000.0, 12_500.0, 14_000.0,
    ])
    .expect("estimate");
    assert_close(estimate.mean, 12_083.33);
    assert_close(estimate.slope, 11_750.0 / 15.0);
}

#[test]
fn linear_forecast_predicts_one_step_ahead() {
    let points = history(&[10_000.0, 12_000.0, 11_000.0, 13_000.0, 12_500.0, 14_000.0]);
    let forecast = ForecastService::forecast(&points, 1, &ForecastSettings::default()).unwrap();

    assert_eq!(forecast.len(), 2);
    assert!(forecast[0].is_connection);
    assert_eq!(forecast[0].cumulative_savings, points[5].cumulative_savings);
    assert_eq!(forecast[0].month, month(2025, 9));
    assert!(!forecast[1].is_connection);
    assert_eq!(forecast[1].month, month(2025, 10));
    assert_close(forecast[1].monthly_savings, 12_083.33 + 783.33);
}

#[test]
fn linear_forecast_requires_full_window() {
    let points = history(&[10_000.0, 12_000.0, 11_000.0, 13_000.0, 12_500.0]);
    let forecast = ForecastService::forecast(&points, 6, &ForecastSettings::default()).unwrap();
    assert!(forecast.is_empty());
}

#[test]
fn linear_forecast_floors_predictions() {
    let points = history(&[-5_000.0, -8_000.0, -2_000.0, -9_000.0, -12_000.0, -15_000.0]);
    let forecast = ForecastService::forecast(&points, 12, &ForecastSettings::default()).unwrap();
    assert_eq!(forecast.len(), 13);
    assert!(forecast
        .iter()
        .filter(|p| !p.is_connection)
        .all(|p| p.monthly_savings >= 1_000.0));
}

#[test]
fn running_cumulative_accumulates_step_by_step() {
    let points = history(&[20_000.0; 6]);
    let last = points[5].cumulative_savings;
    let forecast = ForecastService::forecast(&points, 3, &ForecastSettings::default()).unwrap();
    assert_close(forecast[1].cumulative_savings, last + 20_000.0);
    assert_close(forecast[2].cumulative_savings, last + 40_000.0);
    assert_close(forecast[3].cumulative_savings, last + 60_000.0);
}

#[test]
fn step_scaled_cumulative_multiplies_by_step() {
    let points = history(&[10_000.0, 12_000.0, 11_000.0, 13_000.0, 12_500.0, 14_000.0]);
    let last = points[5].cumulative_savings;
    let settings = ForecastSettings {
        cumulative: CumulativeMode::StepScaled,
        ..ForecastSettings::default()
    };
    let forecast = ForecastService::forecast(&points, 3, &settings).unwrap();
    for (step, point) in forecast.iter().enumerate().skip(1) {
        assert_close(
            point.cumulative_savings,
            last + point.monthly_savings * step as f64,
        );
    }
}

#[test]
fn forecast_month_labels_advance_across_years() {
    let points = history(&[15_000.0; 8]);
    let forecast = ForecastService::forecast(&points, 6, &ForecastSettings::default()).unwrap();
    let labels: Vec<String> = forecast.iter().map(|p| p.month.to_string()).collect();
    assert_eq!(
        labels,
        vec!["2025-09", "2025-10", "2025-11", "2025-12", "2026-01", "2026-02", "2026-03"]
    );
}

#[test]
fn zero_periods_yield_no_forecast() {
    let points = history(&[15_000.0; 8]);
    let forecast = ForecastService::forecast(&points, 0, &ForecastSettings::default()).unwrap();
    assert!(forecast.is_empty());
}

#[test]
fn oversized_horizon_is_rejected() {
    let points = history(&[15_000.0; 8]);
    let settings = ForecastSettings::default();
    let err = ForecastService::forecast(&points, usize::MAX, &settings).unwrap_err();
    assert!(matches!(err, CoreError::InvalidSettings(ref msg) if msg.contains("at most 120")));

    let at_limit = ForecastService::forecast(&points, settings.max_periods, &settings).unwrap();
    assert_eq!(at_limit.len(), settings.max_periods + 1);

    let too_long = ForecastSettings {
        periods: 121,
        ..ForecastSettings::default()
    };
    assert!(matches!(
        ForecastService::forecaster(&too_long),
        Err(CoreError::InvalidSettings(_))
    ));
}

#[test]
fn invalid_linear_window_is_rejected() {
    let settings = ForecastSettings {
        linear: LinearTrendSettings {
            window: 1,
            floor: 1_000.0,
        },
        ..ForecastSettings::default()
    };
    let err = ForecastService::forecast(&history(&[1.0; 6]), 3, &settings).unwrap_err();
    assert!(matches!(err, CoreError::InvalidSettings(_)));
}

#[test]
fn holt_winters_needs_three_points() {
    let settings = ForecastSettings {
        method: ForecastMethod::HoltWinters,
        ..ForecastSettings::default()
    };
    assert!(ForecastService::forecast(&history(&[10_000.0, 11_000.0]), 6, &settings)
        .unwrap()
        .is_empty());
    let forecast =
        ForecastService::forecast(&history(&[10_000.0, 11_000.0, 12_000.0]), 6, &settings)
            .unwrap();
    assert_eq!(forecast.len(), 7);
    assert!(forecast.iter().all(|p| p.monthly_savings >= 0.0));
}

#[test]
fn holt_winters_flat_series_stays_flat() {
    let forecaster = HoltWintersForecaster::new(HoltWintersSettings::default()).unwrap();
    let predictions = forecaster.project(&[10_000.0; 12], 4);
    assert_eq!(predictions.len(), 4);
    for value in predictions {
        assert_close(value, 10_000.0);
    }
}

#[test]
fn holt_winters_tracks_linear_growth() {
    let forecaster = HoltWintersForecaster::new(HoltWintersSettings::default()).unwrap();
    let values: Vec<f64> = (0..12).map(|i| 10_000.0 + 1_000.0 * i as f64).collect();
    let predictions = forecaster.project(&values, 3);
    assert!(predictions[0] > 15_000.0);
    assert!(predictions[2] > predictions[0]);
}

#[test]
fn holt_winters_survives_zero_values() {
    let forecaster = HoltWintersForecaster::new(HoltWintersSettings::default()).unwrap();
    let predictions = forecaster.project(&[0.0, 0.0, 5_000.0, 0.0, 8_000.0], 4);
    assert!(predictions.iter().all(|v| v.is_finite() && *v >= 0.0));
}

#[test]
fn holt_winters_rejects_out_of_range_smoothing() {
    let err = HoltWintersForecaster::new(HoltWintersSettings {
        alpha: 1.5,
        ..HoltWintersSettings::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("alpha"));
}

#[test]
fn goal_on_track_when_average_exceeds_requirement() {
    // 50k saved, 200k due a year out, 15k/month average.
    let mut points = history(&[15_000.0; 6]);
    let offset = 50_000.0 - points[5].cumulative_savings;
    for point in &mut points {
        point.cumulative_savings += offset;
    }
    let today = date(2025, 10, 15);
    let analysis = GoalService::analyze(
        &goal(200_000.0, date(2026, 10, 1)),
        &points,
        today,
        &GoalSettings::default(),
        &RupeeFormatter,
    );

    assert_eq!(analysis.months_remaining, 12);
    assert_close(analysis.remaining_amount, 150_000.0);
    assert_close(analysis.required_monthly_savings, 12_500.0);
    assert_eq!(analysis.status, GoalStatus::OnTrack);
    assert_eq!(analysis.likelihood_percent, 100);
}

#[test]
fn goal_overdue_when_date_passed() {
    let mut points = history(&[12_500.0; 6]);
    points[5].cumulative_savings = 75_000.0;
    let analysis = GoalService::analyze(
        &goal(300_000.0, date(2025, 3, 1)),
        &points,
        date(2025, 10, 15),
        &GoalSettings::default(),
        &RupeeFormatter,
    );
    assert_eq!(analysis.status, GoalStatus::Overdue);
    assert_eq!(analysis.likelihood_percent, 0);
    assert_eq!(analysis.months_remaining, 0);
}

#[test]
fn achieved_takes_priority_over_overdue() {
    let points = history(&[20_000.0; 5]);
    let analysis = GoalService::analyze(
        &goal(100_000.0, date(2024, 1, 1)),
        &points,
        date(2025, 10, 15),
        &GoalSettings::default(),
        &RupeeFormatter,
    );
    assert_eq!(analysis.status, GoalStatus::Achieved);
    assert_eq!(analysis.likelihood_percent, 100);
    assert_close(analysis.progress_percent, 100.0);
}

#[test]
fn moderate_risk_recommends_monthly_gap() {
    // 60k remaining over 6 months = 10k/month; 6k average -> 60%.
    let points = history(&[6_000.0; 6]);
    let analysis = GoalService::analyze(
        &goal(96_000.0, date(2026, 4, 1)),
        &points,
        date(2025, 10, 1),
        &GoalSettings::default(),
        &RupeeFormatter,
    );
    assert_eq!(analysis.status, GoalStatus::ModerateRisk);
    assert_eq!(analysis.likelihood_percent, 60);
    assert!(
        analysis.recommendation.contains("₹4,000"),
        "{}",
        analysis.recommendation
    );
}

#[test]
fn at_risk_suggests_deadline_extension() {
    // 100k remaining over 5 months = 20k/month; 5k average -> 25%.
    let points = history(&[5_000.0; 4]);
    let analysis = GoalService::analyze(
        &goal(120_000.0, date(2026, 3, 1)),
        &points,
        date(2025, 10, 1),
        &GoalSettings::default(),
        &RupeeFormatter,
    );
    assert_eq!(analysis.status, GoalStatus::AtRisk);
    assert_eq!(analysis.likelihood_percent, 25);
    assert!(analysis.recommendation.contains("₹15,000"));
    assert!(analysis.recommendation.contains("15 months"));
}

#[test]
fn negative_average_clamps_likelihood_to_zero() {
    let points = history(&[-2_000.0; 6]);
    let analysis = GoalService::analyze(
        &goal(50_000.0, date(2026, 10, 1)),
        &points,
        date(2025, 10, 1),
        &GoalSettings::default(),
        &RupeeFormatter,
    );
    assert_eq!(analysis.status, GoalStatus::AtRisk);
    assert_eq!(analysis.likelihood_percent, 0);
    assert!(!analysis.recommendation.contains("extending the deadline by"));
}

#[test]
fn goal_balance_source_uses_manual_amount() {
    let mut target = goal(100_000.0, date(2026, 10, 1));
    target.current_amount = 100_000.0;
    let settings = GoalSettings {
        savings_source: SavingsSource::GoalBalance,
        ..GoalSettings::default()
    };
    let analysis = GoalService::analyze(
        &target,
        &[],
        date(2025, 10, 1),
        &settings,
        &RupeeFormatter,
    );
    assert_eq!(analysis.status, GoalStatus::Achieved);
}

#[test]
fn empty_history_counts_as_nothing_saved() {
    let analysis = GoalService::analyze(
        &goal(60_000.0, date(2026, 10, 1)),
        &[],
        date(2025, 10, 1),
        &GoalSettings::default(),
        &RupeeFormatter,
    );
    assert_eq!(analysis.current_savings, 0.0);
    assert_eq!(analysis.status, GoalStatus::AtRisk);
    assert_eq!(analysis.likelihood_percent, 0);
}

#[test]
fn likelihood_always_within_bounds() {
    let today = date(2025, 10, 1);
    for average in [-50_000.0, -1.0, 0.0, 1.0, 3_000.0, 9_999.0, 1_000_000.0] {
        let points = history(&[average; 6]);
        for target in [10_000.0, 250_000.0, 5_000_000.0] {
            let analysis = GoalService::analyze(
                &goal(target, date(2027, 1, 1)),
                &points,
                today,
                &GoalSettings::default(),
                &RupeeFormatter,
            );
            assert!(analysis.likelihood_percent <= 100);
            assert!((0.0..=100.0).contains(&analysis.progress_percent));
        }
    }
}

#[test]
fn validate_draft_collects_all_problems() {
    let draft = GoalDraft {
        name: "   ".into(),
        target_amount: 500.0,
        target_month: month(2025, 9),
    };
    let errors = GoalService::validate_draft(
        &draft,
        date(2025, 10, 18),
        &GoalLimits::default(),
        &RupeeFormatter,
    );
    assert_eq!(errors.len(), 3, "{errors:?}");
    assert!(errors.contains(&"Goal name is required".to_string()));
    assert!(errors.contains(&"Target amount should be at least ₹1,000".to_string()));
    assert!(errors.contains(&"Target date must be in the future".to_string()));
}

#[test]
fn validate_draft_flags_unrealistic_monthly_requirement() {
    let draft = GoalDraft {
        name: "House".into(),
        target_amount: 3_000_000.0,
        target_month: month(2026, 4),
    };
    let errors = GoalService::validate_draft(
        &draft,
        date(2025, 10, 18),
        &GoalLimits::default(),
        &RupeeFormatter,
    );
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("₹500,000/month"));
}

#[test]
fn validate_draft_rejects_far_future() {
    let draft = GoalDraft {
        name: "Retirement".into(),
        target_amount: 1_000_000.0,
        target_month: month(2031, 1),
    };
    let errors = GoalService::validate_draft(
        &draft,
        date(2025, 10, 18),
        &GoalLimits::default(),
        &RupeeFormatter,
    );
    assert_eq!(
        errors,
        vec!["Target date should be within 60 months for realistic planning".to_string()]
    );
}

#[test]
fn create_goal_sets_first_of_month() {
    let draft = GoalDraft {
        name: "  Vacation ".into(),
        target_amount: 90_000.0,
        target_month: month(2026, 6),
    };
    let created = GoalService::create_goal(
        &draft,
        date(2025, 10, 18),
        &GoalLimits::default(),
        &RupeeFormatter,
    )
    .expect("valid goal");
    assert_eq!(created.name, "Vacation");
    assert_eq!(created.target_date, date(2026, 6, 1));
    assert_eq!(created.current_amount, 0.0);
    assert!(!created.id.is_empty());
}

#[test]
fn create_goal_returns_validation_error() {
    let draft = GoalDraft {
        name: String::new(),
        target_amount: 90_000.0,
        target_month: month(2026, 6),
    };
    let err = GoalService::create_goal(
        &draft,
        date(2025, 10, 18),
        &GoalLimits::default(),
        &RupeeFormatter,
    )
    .unwrap_err();
    match err {
        CoreError::Validation(problems) => {
            assert_eq!(problems, vec!["Goal name is required".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn stored_goal_with_negative_target_is_rejected() {
    let mut goal = SavingsGoal::new("Bogus", -5_000.0, date(2020, 1, 1));
    goal.id = "goal-bogus".into();
    let err = GoalService::check_goal(&goal).unwrap_err();
    assert!(err.to_string().contains("goal `goal-bogus` needs a positive target amount"));

    goal.name = "  ".into();
    goal.target_amount = f64::NAN;
    match GoalService::check_goal(&goal) {
        Err(CoreError::Validation(problems)) => assert_eq!(problems.len(), 2),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn overdue_stored_goal_passes_checks() {
    let goal = SavingsGoal::new("Old Trip", 50_000.0, date(2020, 1, 1));
    assert!(GoalService::check_goal(&goal).is_ok());
}

#[test]
fn timeline_rating_bands() {
    let today = date(2025, 10, 18);
    let limits = GoalLimits::default();
    let target = month(2026, 10);
    assert_eq!(
        GoalService::timeline_rating(120_000.0, target, today, &limits),
        Some(TimelineRating::Excellent)
    );
    assert_eq!(
        GoalService::timeline_rating(300_000.0, target, today, &limits),
        Some(TimelineRating::Good)
    );
    assert_eq!(
        GoalService::timeline_rating(480_000.0, target, today, &limits),
        Some(TimelineRating::Challenging)
    );
    assert_eq!(
        GoalService::timeline_rating(900_000.0, target, today, &limits),
        Some(TimelineRating::Unrealistic)
    );
    assert_eq!(
        GoalService::timeline_rating(900_000.0, month(2025, 10), today, &limits),
        None
    );
}

#[test]
fn select_goal_by_id_or_name() {
    let goals = vec![
        goal(100_000.0, date(2026, 1, 1)),
        SavingsGoal {
            id: "goal-2".into(),
            name: "New Laptop".into(),
            target_amount: 120_000.0,
            target_date: date(2026, 3, 1),
            current_amount: 0.0,
        },
    ];
    assert_eq!(GoalService::select_goal(&goals, "goal-2").unwrap().name, "New Laptop");
    assert_eq!(GoalService::select_goal(&goals, "new laptop").unwrap().id, "goal-2");
    assert!(matches!(
        GoalService::select_goal(&goals, "yacht"),
        Err(CoreError::GoalNotFound(_))
    ));
}

#[test]
fn insights_skip_connection_point() {
    let points = history(&[10_000.0; 6]);
    let forecast = ForecastService::forecast(&points, 6, &ForecastSettings::default()).unwrap();
    let target = goal(200_000.0, date(2025, 12, 1));

    let insights = InsightService::summarize(&points, &forecast, Some(&target), 6);

    assert_close(insights.average_monthly_savings, 10_000.0);
    assert_close(insights.total_savings, 60_000.0);
    assert_close(insights.projected_total.unwrap(), 120_000.0);
    assert_close(insights.projected_growth_percent.unwrap(), 100.0);
    assert_close(insights.projected_at_target.unwrap(), 90_000.0);
}

#[test]
fn insights_without_forecast() {
    let points = history(&[10_000.0; 3]);
    let target = goal(200_000.0, date(2025, 9, 1));
    let insights = InsightService::summarize(&points, &[], Some(&target), 6);
    assert_eq!(insights.projected_total, None);
    assert_eq!(insights.projected_at_target, None);
}

#[test]
fn forecaster_dispatch_follows_method() {
    let linear = ForecastService::forecaster(&ForecastSettings::default()).unwrap();
    assert_eq!(linear.name(), "linear-trend");
    assert_eq!(linear.min_points(), 6);
    let hw = ForecastService::forecaster(&ForecastSettings {
        method: ForecastMethod::HoltWinters,
        ..ForecastSettings::default()
    })
    .unwrap();
    assert_eq!(hw.name(), "holt-winters");
    assert_eq!(hw.min_points(), 3);
}
