use chrono::Datelike;
use rust_decimal::Decimal;

use crate::balances::LedgerEntry;
use crate::balances::amount::Magnitudes;
use crate::balances::columns::LedgerColumns;
use crate::balances::date::{month_name, parse_timestamp};
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Withdraw,
    Fee,
    Other,
}

impl Operation {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "DEPOSIT" => Self::Deposit,
            "WITHDRAW" => Self::Withdraw,
            "FEE" => Self::Fee,
            _ => Self::Other,
        }
    }

    /// Direction applied to the normalized magnitude.
    pub fn sign(self) -> Decimal {
        match self {
            Self::Deposit => Decimal::ONE,
            Self::Withdraw | Self::Fee => Decimal::NEGATIVE_ONE,
            Self::Other => Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub entries: Vec<LedgerEntry>,
    pub rows_dropped: usize,
    pub rows_ignored: usize,
}

/// Splits rows into asset flows (deposits and withdrawals, keyed by the
/// asset column) and fee flows (keyed by `feeAsset`) and concatenates them.
///
/// `magnitudes` must hold one entry per table row.
pub(crate) fn build_ledger(
    table: &Table,
    columns: &LedgerColumns,
    magnitudes: &[Magnitudes],
) -> Ledger {
    let mut asset_flows = Vec::new();
    let mut fee_flows = Vec::new();
    let mut ledger = Ledger::default();

    for (row, magnitude) in table.rows().iter().zip(magnitudes) {
        let cell = |index: usize| row.get(index).map(String::as_str).unwrap_or("");

        let Some(timestamp) = parse_timestamp(cell(columns.date)) else {
            ledger.rows_dropped += 1;
            continue;
        };
        let year = timestamp.year();
        let month = timestamp.month();

        let operation = Operation::parse(cell(columns.operation));
        let (asset_index, amount, flows) = match operation {
            Operation::Deposit | Operation::Withdraw => (
                columns.asset,
                magnitude.asset.unwrap_or_default(),
                &mut asset_flows,
            ),
            Operation::Fee => (
                columns.fee_asset,
                magnitude.fee.unwrap_or_default(),
                &mut fee_flows,
            ),
            Operation::Other => {
                ledger.rows_ignored += 1;
                continue;
            }
        };

        flows.push(LedgerEntry {
            wallet_name: cell(columns.wallet).to_string(),
            asset: cell(asset_index).to_string(),
            amount: amount * operation.sign(),
            year,
            month,
            month_name: month_name(month),
        });
    }

    ledger.entries = asset_flows;
    ledger.entries.append(&mut fee_flows);
    ledger
}
