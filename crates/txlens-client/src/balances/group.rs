use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::balances::date::month_name;
use crate::balances::{BalanceRecord, LedgerEntry, PeriodSelector, PeriodSummary};
use crate::{ClientError, ClientResult};

type BalanceKey = (String, String, i32, u32);

/// Sums ledger amounts per (wallet, asset, year, month), sorted by that key.
/// Net-zero groups are kept. A sum beyond the `Decimal` range fails with
/// `balance_overflow`.
pub fn group_and_sum(
    entries: &[LedgerEntry],
    period: Option<PeriodSelector>,
) -> ClientResult<Vec<BalanceRecord>> {
    let mut totals: BTreeMap<BalanceKey, Decimal> = BTreeMap::new();

    for entry in entries {
        if let Some(selector) = period
            && !selector.matches(entry.year, entry.month)
        {
            continue;
        }

        let key = (
            entry.wallet_name.clone(),
            entry.asset.clone(),
            entry.year,
            entry.month,
        );
        let total = totals.entry(key).or_default();
        *total = total.checked_add(entry.amount).ok_or_else(|| {
            ClientError::balance_overflow(&entry.wallet_name, &entry.asset, entry.year, entry.month)
        })?;
    }

    let records: Vec<BalanceRecord> = totals
        .into_iter()
        .map(|((wallet_name, asset, year, month), amount)| BalanceRecord {
            wallet_name,
            asset,
            year,
            month,
            month_name: month_name(month),
            amount: amount.normalize(),
        })
        .collect();
    Ok(records)
}

/// Distinct (year, month) periods present in the ledger, oldest first.
pub fn available_periods(entries: &[LedgerEntry]) -> Vec<PeriodSummary> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry((entry.year, entry.month)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((year, month), entries)| PeriodSummary {
            year,
            month,
            month_name: month_name(month),
            entries,
        })
        .collect()
}
