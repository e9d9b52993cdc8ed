use dialoguer::theme::ColorfulTheme;
use finz_core::{AggregationService, CoreError, CurrencyFormatter, ForecastService, GoalService};
use finz_domain::{Displayable, ForecastMethod, ForecastSettings, GoalDraft, YearMonth};

use crate::cli::args::{suggest_command, CliCommand, ConfigAction, GlobalOptions, COMMANDS};
use crate::cli::context::CliContext;
use crate::cli::{output, prompts};
use crate::currency::format_date;
use crate::errors::{CliError, FinzError};
use crate::report::{GoalReport, SavingsReport};
use crate::utils::build_info;

pub type CommandResult = Result<(), CliError>;

/// Runs `command`. Help and version never touch configuration or fixtures.
pub fn dispatch(options: GlobalOptions, command: CliCommand) -> CommandResult {
    let context = match &command {
        CliCommand::Help { topic } => return cmd_help(topic.as_deref()),
        CliCommand::Version => return cmd_version(),
        _ => CliContext::new(options)?,
    };
    if !context.config.ui_color_enabled {
        output::disable_color();
    }
    let context = &context;
    match command {
        CliCommand::History => cmd_history(context),
        CliCommand::Forecast { periods, method } => cmd_forecast(context, periods, method),
        CliCommand::Goals => cmd_goals(context),
        CliCommand::Analyze { goal } => cmd_analyze(context, &goal),
        CliCommand::Report { goal, json } => cmd_report(context, goal.as_deref(), json),
        CliCommand::GoalCheck {
            name,
            amount,
            target,
        } => cmd_goal_check(context, name, amount, target),
        CliCommand::Config(action) => cmd_config(context, action),
        CliCommand::Version => cmd_version(),
        CliCommand::Help { topic } => cmd_help(topic.as_deref()),
    }
}

fn cmd_history(context: &CliContext) -> CommandResult {
    let history = AggregationService::aggregate(&context.records()?);
    if history.is_empty() {
        output::warning("No monthly records found.");
        return Ok(());
    }
    let fmt = &context.formatter;
    output::section("Savings history");
    let rows: Vec<Vec<String>> = history
        .iter()
        .map(|point| {
            vec![
                point.month.short_label(),
                fmt.format_amount(point.monthly_savings),
                fmt.format_amount(point.cumulative_savings),
            ]
        })
        .collect();
    output::table(&["Month", "Saved", "Total"], &rows);
    println!();
    output::two_column(&[
        (
            "Average",
            fmt.format_amount(AggregationService::trailing_average(
                &history,
                context.config.analysis.average_window,
            )),
        ),
        (
            "Total saved",
            fmt.format_amount(AggregationService::current_savings(&history)),
        ),
    ]);
    Ok(())
}

fn cmd_forecast(
    context: &CliContext,
    periods: Option<usize>,
    method: Option<ForecastMethod>,
) -> CommandResult {
    let settings = ForecastSettings {
        method: method.unwrap_or(context.config.forecast.method),
        periods: periods.unwrap_or(context.config.forecast.periods),
        ..context.config.forecast.clone()
    };
    let history = AggregationService::aggregate(&context.records()?);
    let forecaster = ForecastService::forecaster(&settings)?;
    let forecast = ForecastService::forecast_with(
        forecaster.as_ref(),
        &history,
        settings.periods,
        settings.cumulative,
    );

    if forecast.is_empty() {
        if settings.periods == 0 {
            output::info("Nothing to forecast for 0 periods.");
        } else {
            output::warning(format!(
                "Not enough history to forecast with {} (need {} months, have {}).",
                settings.method,
                forecaster.min_points(),
                history.len()
            ));
        }
        return Ok(());
    }

    let fmt = &context.formatter;
    output::section(format!("Savings forecast ({})", settings.method));
    let rows: Vec<Vec<String>> = forecast
        .iter()
        .map(|point| {
            let label = if point.is_connection {
                format!("{} (actual)", point.month.short_label())
            } else {
                point.month.short_label()
            };
            vec![
                label,
                fmt.format_amount(point.monthly_savings),
                fmt.format_amount(point.cumulative_savings),
            ]
        })
        .collect();
    output::table(&["Month", "Monthly", "Cumulative"], &rows);
    Ok(())
}

fn build_report(context: &CliContext, active: Option<&str>) -> Result<SavingsReport, CliError> {
    let records = context.records()?;
    let goals = context.goals()?;
    let report = SavingsReport::build(
        &records,
        &goals,
        active,
        context.today(),
        &context.config,
        &context.formatter,
    )?;
    Ok(report)
}

fn cmd_goals(context: &CliContext) -> CommandResult {
    let report = build_report(context, None)?;
    if report.goals.is_empty() {
        output::info("No savings goals defined.");
        return Ok(());
    }
    output::section("Savings goals");
    for entry in &report.goals {
        print_goal_summary(context, entry);
    }
    Ok(())
}

fn print_goal_summary(context: &CliContext, entry: &GoalReport) {
    let fmt = &context.formatter;
    let analysis = &entry.analysis;
    println!(
        "  {} {}  {}% likely",
        output::status_badge(analysis.status),
        entry.goal.display_label(),
        analysis.likelihood_percent
    );
    println!(
        "      {} of {} ({:.0}%), {} left",
        fmt.format_amount(analysis.current_savings.min(entry.goal.target_amount)),
        fmt.format_amount(entry.goal.target_amount),
        analysis.progress_percent,
        fmt.format_amount(analysis.remaining_amount)
    );
}

fn cmd_analyze(context: &CliContext, key: &str) -> CommandResult {
    let report = build_report(context, Some(key))?;
    let entry = report
        .active_goal()
        .ok_or_else(|| FinzError::GoalNotFound(key.to_string()))?;
    print_goal_detail(context, entry);
    Ok(())
}

fn print_goal_detail(context: &CliContext, entry: &GoalReport) {
    let fmt = &context.formatter;
    let analysis = &entry.analysis;
    output::section(format!("Goal: {}", entry.goal.name));
    println!("  {}", output::status_badge(analysis.status));
    output::two_column(&[
        ("Target", fmt.format_amount(entry.goal.target_amount)),
        (
            "Due",
            format_date(&context.formatter.locale, entry.goal.target_date),
        ),
        ("Saved", fmt.format_amount(analysis.current_savings)),
        ("Remaining", fmt.format_amount(analysis.remaining_amount)),
        ("Progress", format!("{:.1}%", analysis.progress_percent)),
        ("Months left", analysis.months_remaining.to_string()),
        (
            "Needed / month",
            fmt.format_amount(analysis.required_monthly_savings),
        ),
        (
            "Average / month",
            fmt.format_amount(analysis.average_monthly_savings),
        ),
        ("Likelihood", format!("{}%", analysis.likelihood_percent)),
    ]);
    println!();
    output::info(&analysis.message);
    output::info(&analysis.recommendation);
}

fn cmd_report(context: &CliContext, goal: Option<&str>, json: bool) -> CommandResult {
    let report = build_report(context, goal)?;
    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(FinzError::from)?;
        println!("{rendered}");
        return Ok(());
    }

    let fmt = &context.formatter;
    output::section(format!("Savings report as of {}", report.as_of));
    let insights = &report.insights;
    let mut rows = vec![
        (
            "Average monthly",
            fmt.format_amount(insights.average_monthly_savings),
        ),
        ("Total saved", fmt.format_amount(insights.total_savings)),
    ];
    if let Some(total) = insights.projected_total {
        let growth = insights
            .projected_growth_percent
            .map(|pct| format!(" ({pct:+.1}%)"))
            .unwrap_or_default();
        rows.push(("Projected total", format!("{}{growth}", fmt.format_amount(total))));
    }
    if let (Some(at_target), Some(active)) = (insights.projected_at_target, report.active_goal()) {
        rows.push((
            "At goal month",
            format!(
                "{} by {}",
                fmt.format_amount(at_target),
                active.marker.month.long_label()
            ),
        ));
    }
    output::two_column(&rows);

    if report.forecast.is_empty() {
        output::warning("Not enough history for a forecast.");
    } else {
        output::section(format!("Forecast ({})", report.method));
        let rows: Vec<Vec<String>> = report
            .projections()
            .map(|point| {
                vec![
                    point.month.short_label(),
                    fmt.format_amount(point.monthly_savings),
                    fmt.format_amount(point.cumulative_savings),
                ]
            })
            .collect();
        output::table(&["Month", "Monthly", "Cumulative"], &rows);
    }

    if let Some(active) = report.active_goal() {
        print_goal_detail(context, active);
    } else {
        output::info("No savings goals defined.");
    }
    Ok(())
}

fn cmd_goal_check(
    context: &CliContext,
    name: Option<String>,
    amount: Option<f64>,
    target: Option<YearMonth>,
) -> CommandResult {
    let theme = ColorfulTheme::default();
    let missing = name.is_none() || amount.is_none() || target.is_none();
    if missing && !prompts::interactive() {
        return Err(CliError::Input(
            "goal-check needs --name, --amount and --target when not run in a terminal".into(),
        ));
    }
    let draft = GoalDraft {
        name: match name {
            Some(name) => name,
            None => prompts::goal_name(&theme)?,
        },
        target_amount: match amount {
            Some(amount) => amount,
            None => prompts::target_amount(&theme)?,
        },
        target_month: match target {
            Some(month) => month,
            None => prompts::target_month(&theme)?,
        },
    };

    let today = context.today();
    let limits = &context.config.limits;
    let goal = match GoalService::create_goal(&draft, today, limits, &context.formatter) {
        Ok(goal) => goal,
        Err(CoreError::Validation(problems)) => {
            for problem in &problems {
                output::error(problem);
            }
            return Err(CliError::Command(format!(
                "goal `{}` is not valid",
                draft.name.trim()
            )));
        }
        Err(err) => return Err(err.into()),
    };
    output::success(format!("Goal `{}` looks valid.", goal.name));
    let months = YearMonth::from_date(today).months_until(draft.target_month);
    output::two_column(&[
        ("Target", context.formatter.format_amount(goal.target_amount)),
        ("Due", goal.target_month().long_label()),
        (
            "Needed / month",
            context
                .formatter
                .format_amount(goal.target_amount / months.max(1) as f64),
        ),
    ]);
    if let Some(rating) =
        GoalService::timeline_rating(draft.target_amount, draft.target_month, today, limits)
    {
        output::info(format!("Timeline: {rating}. {}", rating.message()));
    }
    Ok(())
}

fn cmd_config(context: &CliContext, action: ConfigAction) -> CommandResult {
    match action {
        ConfigAction::Show => {
            let rendered = context.config.to_json()?;
            println!("{rendered}");
        }
        ConfigAction::Path => {
            println!("{}", context.config_manager.config_path().display());
        }
        ConfigAction::Init => {
            if context.config_manager.exists() {
                output::warning(format!(
                    "Configuration already exists at {}",
                    context.config_manager.config_path().display()
                ));
            } else {
                context.config_manager.save(&context.config)?;
                output::success(format!(
                    "Wrote default configuration to {}",
                    context.config_manager.config_path().display()
                ));
            }
        }
    }
    Ok(())
}

fn cmd_version() -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Finz {}", meta.version));
    output::two_column(&[
        ("CLI version", build_info::CLI_VERSION.to_string()),
        ("Build hash", format!("{} ({})", meta.git_hash, meta.git_status)),
        ("Built at", meta.timestamp.to_string()),
        ("Target", meta.target.to_string()),
        ("Profile", meta.profile.to_string()),
        ("Rustc", meta.rustc.to_string()),
    ]);
    Ok(())
}

fn cmd_help(topic: Option<&str>) -> CommandResult {
    if let Some(topic) = topic {
        let key = topic.to_ascii_lowercase();
        if let Some((name, usage, description)) =
            COMMANDS.iter().find(|(name, _, _)| *name == key)
        {
            output::section(format!("Help: {name}"));
            output::two_column(&[
                ("description", description.to_string()),
                ("usage", format!("finz_cli {usage}")),
            ]);
            return Ok(());
        }
        let mut message = format!("Unknown command `{topic}`.");
        if let Some(best) = suggest_command(&key) {
            message.push_str(&format!(" Suggestion: `{best}`?"));
        }
        output::warning(message);
        return Ok(());
    }

    output::section("Available commands");
    let rows: Vec<(&str, String)> = COMMANDS
        .iter()
        .map(|(name, _, description)| (*name, description.to_string()))
        .collect();
    output::two_column(&rows);
    println!();
    output::two_column(&[(
        "Global options",
        "--records FILE | --transactions FILE, --goals FILE, --config FILE, --today YYYY-MM-DD, --plain"
            .to_string(),
    )]);
    println!("  Use `help <command>` for details.");
    Ok(())
}
