use std::path::PathBuf;

use chrono::NaiveDate;
use finz_domain::{ForecastMethod, YearMonth};
use strsim::levenshtein;

use crate::errors::CliError;

/// Command name, usage line and description, in help order.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("history", "history", "Monthly savings history with running totals"),
    (
        "forecast",
        "forecast [--periods N] [--method linear|holt-winters]",
        "Project monthly and cumulative savings",
    ),
    ("goals", "goals", "Status of every savings goal"),
    ("analyze", "analyze <goal>", "Detailed analysis of one goal (id or name)"),
    (
        "report",
        "report [<goal>] [--json]",
        "History, forecast, goals and insights in one view",
    ),
    (
        "goal-check",
        "goal-check [--name NAME] [--amount N] [--target YYYY-MM]",
        "Validate a new goal and rate its timeline",
    ),
    ("config", "config show|path|init", "Inspect or create the configuration file"),
    ("version", "version", "Show build metadata"),
    ("help", "help [command]", "Show available commands"),
];

/// Options accepted before or after any command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub records: Option<PathBuf>,
    pub transactions: Option<PathBuf>,
    pub goals: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub today: Option<NaiveDate>,
    pub plain: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    Path,
    Init,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    History,
    Forecast {
        periods: Option<usize>,
        method: Option<ForecastMethod>,
    },
    Goals,
    Analyze {
        goal: String,
    },
    Report {
        goal: Option<String>,
        json: bool,
    },
    GoalCheck {
        name: Option<String>,
        amount: Option<f64>,
        target: Option<YearMonth>,
    },
    Config(ConfigAction),
    Version,
    Help {
        topic: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub options: GlobalOptions,
    pub command: CliCommand,
}

pub fn parse_args<I, S>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut options = GlobalOptions::default();
    let mut flags: Vec<(String, Option<String>)> = Vec::new();
    let mut positionals: Vec<String> = Vec::new();

    let mut iter = args.into_iter().map(Into::into);
    while let Some(arg) = iter.next() {
        if !arg.starts_with("--") {
            positionals.push(arg);
            continue;
        }
        let flag = &arg[2..];
        let (name, inline) = match flag.split_once('=') {
            Some((name, value)) => (name.to_string(), Some(value.to_string())),
            None => (flag.to_string(), None),
        };
        match name.as_str() {
            "plain" => options.plain = true,
            "json" => flags.push(("json".to_string(), None)),
            "help" => positionals.insert(0, "help".into()),
            _ => {
                let value = match inline {
                    Some(value) => value,
                    None => iter
                        .next()
                        .ok_or_else(|| CliError::Input(format!("--{name} expects a value")))?,
                };
                match name.as_str() {
                    "records" => options.records = Some(PathBuf::from(value)),
                    "transactions" => options.transactions = Some(PathBuf::from(value)),
                    "goals" => options.goals = Some(PathBuf::from(value)),
                    "config" => options.config = Some(PathBuf::from(value)),
                    "today" => options.today = Some(parse_date(&value)?),
                    _ => flags.push((name.clone(), Some(value))),
                }
            }
        }
    }

    if options.records.is_some() && options.transactions.is_some() {
        return Err(CliError::Input(
            "--records and --transactions are mutually exclusive".into(),
        ));
    }

    let mut positionals = positionals.into_iter();
    let command_name = positionals
        .next()
        .map(|name| name.to_ascii_lowercase())
        .unwrap_or_else(|| "help".into());
    let rest: Vec<String> = positionals.collect();
    let command = build_command(&command_name, rest, &mut flags)?;

    if let Some((name, _)) = flags.first() {
        return Err(CliError::Input(format!(
            "unknown option `--{name}` for `{command_name}`"
        )));
    }

    Ok(Invocation { options, command })
}

fn build_command(
    name: &str,
    rest: Vec<String>,
    flags: &mut Vec<(String, Option<String>)>,
) -> Result<CliCommand, CliError> {
    let command = match name {
        "history" => CliCommand::History,
        "forecast" => CliCommand::Forecast {
            periods: take_flag(flags, "periods")
                .map(|value| parse_number::<usize>("periods", &value))
                .transpose()?,
            method: take_flag(flags, "method")
                .map(|value| value.parse::<ForecastMethod>().map_err(CliError::Input))
                .transpose()?,
        },
        "goals" => CliCommand::Goals,
        "analyze" => CliCommand::Analyze {
            goal: join_words(&rest)
                .ok_or_else(|| CliError::Input("usage: analyze <goal>".into()))?,
        },
        "report" => CliCommand::Report {
            goal: join_words(&rest),
            json: take_switch(flags, "json"),
        },
        "goal-check" => CliCommand::GoalCheck {
            name: take_flag(flags, "name"),
            amount: take_flag(flags, "amount")
                .map(|value| parse_number::<f64>("amount", &value.replace(',', "")))
                .transpose()?,
            target: take_flag(flags, "target")
                .map(|value| {
                    value
                        .parse::<YearMonth>()
                        .map_err(|err| CliError::Input(err.to_string()))
                })
                .transpose()?,
        },
        "config" => {
            let action = match rest.first().map(String::as_str) {
                None | Some("show") => ConfigAction::Show,
                Some("path") => ConfigAction::Path,
                Some("init") => ConfigAction::Init,
                Some(other) => {
                    return Err(CliError::Input(format!(
                        "unknown config action `{other}` (expected show, path or init)"
                    )))
                }
            };
            CliCommand::Config(action)
        }
        "version" => CliCommand::Version,
        "help" => CliCommand::Help {
            topic: rest.first().cloned(),
        },
        other => {
            let mut message = format!("unknown command `{other}`");
            if let Some(best) = suggest_command(other) {
                message.push_str(&format!(". Did you mean `{best}`?"));
            }
            return Err(CliError::Input(message));
        }
    };
    Ok(command)
}

/// Closest known command within edit distance 3.
pub fn suggest_command(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|(name, _, _)| (levenshtein(name, input), *name))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

fn take_flag(flags: &mut Vec<(String, Option<String>)>, name: &str) -> Option<String> {
    let idx = flags.iter().position(|(flag, _)| flag == name)?;
    flags.remove(idx).1
}

fn take_switch(flags: &mut Vec<(String, Option<String>)>, name: &str) -> bool {
    match flags.iter().position(|(flag, _)| flag == name) {
        Some(idx) => {
            flags.remove(idx);
            true
        }
        None => false,
    }
}

fn join_words(words: &[String]) -> Option<String> {
    let joined = words.join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, CliError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| CliError::Input(format!("--{name}: `{value}` is not a valid number")))
}

fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("--today: `{value}` is not a YYYY-MM-DD date")))
}
