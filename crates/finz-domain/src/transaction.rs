//! Cash movement records: per-month inflow/outflow bundles and the flat
//! transaction feed they can be grouped from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{Amounted, YearMonth};

/// A single inflow or outflow. `amount` is always a non-negative magnitude;
/// direction comes from the list the entry sits in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashEntry {
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

impl CashEntry {
    pub fn new(amount: f64, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            description: description.into(),
            date,
        }
    }
}

impl Amounted for CashEntry {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// All inflows and outflows observed in one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTransactionRecord {
    pub month: YearMonth,
    #[serde(default)]
    pub inflows: Vec<CashEntry>,
    #[serde(default)]
    pub outflows: Vec<CashEntry>,
}

impl MonthlyTransactionRecord {
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            inflows: Vec::new(),
            outflows: Vec::new(),
        }
    }

    pub fn with_inflow(mut self, entry: CashEntry) -> Self {
        self.inflows.push(entry);
        self
    }

    pub fn with_outflow(mut self, entry: CashEntry) -> Self {
        self.outflows.push(entry);
        self
    }

    pub fn total_inflow(&self) -> f64 {
        self.inflows.iter().map(Amounted::amount).sum()
    }

    pub fn total_outflow(&self) -> f64 {
        self.outflows.iter().map(Amounted::amount).sum()
    }

    /// Inflow minus outflow. Negative for overspend months.
    pub fn net_savings(&self) -> f64 {
        self.total_inflow() - self.total_outflow()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Inflow,
    Outflow,
}

/// A dashboard transaction row. `amount` carries its sign (outflows are
/// usually negative) but `kind` decides the direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }

    pub fn to_entry(&self) -> CashEntry {
        CashEntry::new(self.amount.abs(), self.description.clone(), self.date)
    }
}
