//! Per-wallet, per-asset monthly balances.
//!
//! Pipeline: resolve columns, normalize amount magnitudes, parse timestamps
//! (dropping rows that fail), split into asset and fee flows, union into a
//! ledger, then group-sum by wallet, asset, year and month.

pub mod amount;
mod columns;
pub mod date;
pub mod group;
pub mod ledger;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::ClientResult;
use crate::config::FieldAliases;
use crate::table::Table;

pub use amount::Magnitudes;
pub use group::{available_periods, group_and_sum};
pub use ledger::{Ledger, Operation};

use amount::normalize_magnitudes;
use ledger::build_ledger;

/// Restricts aggregation to one year, or one month of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodSelector {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

impl PeriodSelector {
    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year,
            month: Some(month),
        }
    }

    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn matches(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month.is_none_or(|selected| selected == month)
    }
}

/// One signed movement of one asset in one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    #[serde(rename = "walletName")]
    pub wallet_name: String,
    pub asset: String,
    pub amount: Decimal,
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceRecord {
    #[serde(rename = "walletName")]
    pub wallet_name: String,
    pub asset: String,
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    pub date_column: String,
    pub rows_read: usize,
    /// Rows excluded because their date did not parse.
    pub rows_dropped: usize,
    /// Rows whose operation is neither a deposit, a withdrawal nor a fee.
    pub rows_ignored: usize,
    pub ledger_entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<PeriodSelector>,
    pub periods: Vec<PeriodSummary>,
    pub balances: Vec<BalanceRecord>,
}

pub fn aggregate_balances(
    table: &Table,
    aliases: &FieldAliases,
    period: Option<PeriodSelector>,
) -> ClientResult<BalanceReport> {
    let columns = columns::resolve(table, aliases)?;
    let magnitudes = normalize_magnitudes(table, &columns)?;
    let ledger = build_ledger(table, &columns, &magnitudes);

    if ledger.rows_dropped > 0 {
        log::warn!(
            "dropped {} of {} rows with an unparseable `{}` value",
            ledger.rows_dropped,
            table.row_count(),
            columns.date_name
        );
    }
    log::debug!(
        "ledger has {} entries; {} rows ignored for operation",
        ledger.entries.len(),
        ledger.rows_ignored
    );

    let periods = available_periods(&ledger.entries);
    let balances = group_and_sum(&ledger.entries, period)?;

    Ok(BalanceReport {
        date_column: columns.date_name.clone(),
        rows_read: table.row_count(),
        rows_dropped: ledger.rows_dropped,
        rows_ignored: ledger.rows_ignored,
        ledger_entries: ledger.entries.len(),
        period,
        periods,
        balances,
    })
}
