//! Reduces monthly cash records into a historical savings series.

use std::collections::BTreeMap;

use finz_domain::{
    HistoricalSavingsPoint, MonthlyTransactionRecord, Transaction, TransactionKind, YearMonth,
};
use tracing::{debug, warn};

pub struct AggregationService;

impl AggregationService {
    /// Builds one point per record, carrying the running total forward.
    ///
    /// Records are consumed in the order given; the caller owns chronology.
    pub fn aggregate(records: &[MonthlyTransactionRecord]) -> Vec<HistoricalSavingsPoint> {
        if !records.windows(2).all(|pair| pair[0].month < pair[1].month) {
            warn!("monthly records are not strictly ascending; keeping input order");
        }
        let mut cumulative = 0.0;
        let points: Vec<HistoricalSavingsPoint> = records
            .iter()
            .map(|record| {
                let monthly_savings = record.net_savings();
                cumulative += monthly_savings;
                HistoricalSavingsPoint {
                    month: record.month,
                    monthly_savings,
                    cumulative_savings: cumulative,
                }
            })
            .collect();
        debug!(months = points.len(), total = cumulative, "aggregated savings history");
        points
    }

    /// Groups a flat transaction feed into ascending monthly records.
    /// Months without activity are not synthesized.
    pub fn group_transactions(transactions: &[Transaction]) -> Vec<MonthlyTransactionRecord> {
        let mut months: BTreeMap<YearMonth, MonthlyTransactionRecord> = BTreeMap::new();
        for txn in transactions {
            let month = txn.month();
            let record = months
                .entry(month)
                .or_insert_with(|| MonthlyTransactionRecord::new(month));
            match txn.kind {
                TransactionKind::Inflow => record.inflows.push(txn.to_entry()),
                TransactionKind::Outflow => record.outflows.push(txn.to_entry()),
            }
        }
        months.into_values().collect()
    }

    /// Mean monthly savings over the last `window` points (fewer if the
    /// history is shorter). Zero for an empty history.
    pub fn trailing_average(points: &[HistoricalSavingsPoint], window: usize) -> f64 {
        let start = points.len().saturating_sub(window);
        let tail = &points[start..];
        if tail.is_empty() {
            return 0.0;
        }
        tail.iter().map(|point| point.monthly_savings).sum::<f64>() / tail.len() as f64
    }

    /// Cumulative savings at the end of the history, or zero.
    pub fn current_savings(points: &[HistoricalSavingsPoint]) -> f64 {
        points
            .last()
            .map(|point| point.cumulative_savings)
            .unwrap_or(0.0)
    }
}
