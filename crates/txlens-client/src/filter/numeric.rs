use std::collections::HashSet;

use crate::filter::RangeBounds;
use crate::table::{Table, is_missing};
use crate::{ClientError, ClientResult};

/// Parses every cell of `column` as `f64`. Missing cells become `None`.
///
/// Any non-empty, non-numeric cell makes the whole column unfilterable; the
/// column is never partially coerced.
pub fn numeric_values(table: &Table, column: &str) -> ClientResult<Vec<Option<f64>>> {
    let index = table
        .column_index(column)
        .ok_or_else(|| ClientError::unknown_filter_column(column, table.headers()))?;

    let mut values = Vec::with_capacity(table.row_count());
    for (row_index, raw) in table.column(index).enumerate() {
        if is_missing(raw) {
            values.push(None);
            continue;
        }
        match parse_number(raw) {
            Some(number) => values.push(Some(number)),
            None => {
                return Err(ClientError::unfilterable_column(column, row_index + 1, raw));
            }
        }
    }

    Ok(values)
}

/// Observed bounds of a numeric column, or `None` when every cell is missing.
pub fn numeric_range(table: &Table, column: &str) -> ClientResult<Option<RangeBounds>> {
    let values = numeric_values(table, column)?;
    let bounds = values.into_iter().flatten().fold(None, |acc, value| match acc {
        None => Some(RangeBounds {
            min: value,
            max: value,
        }),
        Some(RangeBounds { min, max }) => Some(RangeBounds {
            min: min.min(value),
            max: max.max(value),
        }),
    });
    Ok(bounds)
}

/// Distinct non-missing values of `column` in first-seen order.
pub fn column_options(table: &Table, column: &str) -> ClientResult<Vec<String>> {
    let index = table
        .column_index(column)
        .ok_or_else(|| ClientError::unknown_filter_column(column, table.headers()))?;

    let mut seen = HashSet::new();
    let options = table
        .column(index)
        .filter(|value| !is_missing(value))
        .filter(|value| seen.insert(*value))
        .map(std::string::ToString::to_string)
        .collect::<Vec<String>>();
    Ok(options)
}

fn parse_number(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() { Some(value) } else { None }
}
