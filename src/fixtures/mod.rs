//! Fixture loading. Records, transactions and goals are read fresh on
//! every run, either from the embedded sample dataset or a JSON file.

use std::{fs, path::Path};

use finz_core::{AggregationService, GoalService};
use finz_domain::{MonthlyTransactionRecord, SavingsGoal, Transaction};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::{FinzError, Result};

const SAMPLE_RECORDS: &str = include_str!("../../fixtures/sample_records.json");
const SAMPLE_GOALS: &str = include_str!("../../fixtures/sample_goals.json");
const SAMPLE_TRANSACTIONS: &str = include_str!("../../fixtures/sample_transactions.json");

/// Twelve months of sample dashboard records, October 2024 to September 2025.
pub fn sample_records() -> Result<Vec<MonthlyTransactionRecord>> {
    parse("sample records", SAMPLE_RECORDS)
}

pub fn sample_goals() -> Result<Vec<SavingsGoal>> {
    parse("sample goals", SAMPLE_GOALS)
}

pub fn sample_transactions() -> Result<Vec<Transaction>> {
    parse("sample transactions", SAMPLE_TRANSACTIONS)
}

pub fn load_records(path: &Path) -> Result<Vec<MonthlyTransactionRecord>> {
    let records: Vec<MonthlyTransactionRecord> = load(path)?;
    if records.is_empty() {
        warn!(path = %path.display(), "record fixture is empty");
    }
    Ok(records)
}

/// Loads a flat transaction feed and groups it into monthly records.
pub fn load_transactions(path: &Path) -> Result<Vec<MonthlyTransactionRecord>> {
    let transactions: Vec<Transaction> = load(path)?;
    Ok(AggregationService::group_transactions(&transactions))
}

/// Loads goals from a JSON file, rejecting any that cannot be analysed.
pub fn load_goals(path: &Path) -> Result<Vec<SavingsGoal>> {
    let goals: Vec<SavingsGoal> = load(path)?;
    for goal in &goals {
        GoalService::check_goal(goal)?;
    }
    Ok(goals)
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .map_err(|err| FinzError::Fixture(format!("{}: {err}", path.display())))?;
    parse(&path.display().to_string(), &data)
}

fn parse<T: DeserializeOwned>(source: &str, data: &str) -> Result<T> {
    debug!(source, bytes = data.len(), "parsing fixture");
    serde_json::from_str(data).map_err(|err| FinzError::Fixture(format!("{source}: {err}")))
}
