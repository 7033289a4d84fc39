use std::str::FromStr;

use rust_decimal::Decimal;

use crate::balances::columns::LedgerColumns;
use crate::table::{Table, is_missing};
use crate::{ClientError, ClientResult};

/// Absolute asset and fee amounts of one row. `None` means the cell was empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Magnitudes {
    pub asset: Option<Decimal>,
    pub fee: Option<Decimal>,
}

/// Replaces `assetAmount` and `feeAmount` with their absolute values for
/// every row, whatever its operation or date.
pub(crate) fn normalize_magnitudes(
    table: &Table,
    columns: &LedgerColumns,
) -> ClientResult<Vec<Magnitudes>> {
    let mut normalized = Vec::with_capacity(table.row_count());
    for (row_index, row) in table.rows().iter().enumerate() {
        let asset = magnitude_cell(row, columns.asset_amount, &columns.asset_amount_name, row_index)?;
        let fee = magnitude_cell(row, columns.fee_amount, &columns.fee_amount_name, row_index)?;
        normalized.push(Magnitudes { asset, fee });
    }
    Ok(normalized)
}

fn magnitude_cell(
    row: &[String],
    index: usize,
    column: &str,
    row_index: usize,
) -> ClientResult<Option<Decimal>> {
    let raw = row.get(index).map(String::as_str).unwrap_or("");
    if is_missing(raw) {
        return Ok(None);
    }
    match parse_decimal(raw) {
        Some(value) => Ok(Some(value.abs())),
        None if is_finite_number(raw) => {
            Err(ClientError::amount_out_of_range(column, row_index + 1, raw))
        }
        None => Err(ClientError::invalid_amount_type(column, row_index + 1, raw)),
    }
}

/// True for numbers that parse as a float but may not fit a `Decimal`.
fn is_finite_number(raw: &str) -> bool {
    raw.trim()
        .parse::<f64>()
        .is_ok_and(|value| value.is_finite())
}

/// Parses plain (`-12.50`, `+3`) and scientific (`1e-8`) notation.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    Decimal::from_str(unsigned)
        .or_else(|_| Decimal::from_scientific(unsigned))
        .ok()
}
