//! Row filtering over an uploaded table.
//!
//! A request is a pure conjunction: every categorical constraint and every
//! range constraint must hold for a row to survive. Application order never
//! changes the result.

pub mod numeric;
pub mod request;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::table::Table;
use crate::{ClientError, ClientResult};

pub use numeric::{column_options, numeric_range, numeric_values};
pub use request::build_request;

/// Column -> accepted values. An empty set imposes no constraint.
pub type CategoricalFilters = BTreeMap<String, BTreeSet<String>>;

/// Column -> inclusive numeric bounds.
pub type RangeFilters = BTreeMap<String, RangeBounds>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
}

impl RangeBounds {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRequest {
    pub categorical: CategoricalFilters,
    pub ranges: RangeFilters,
}

impl FilterRequest {
    pub fn is_empty(&self) -> bool {
        self.categorical.values().all(BTreeSet::is_empty) && self.ranges.is_empty()
    }

    pub fn with_values<I, S>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical
            .entry(column.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_range(mut self, column: &str, min: f64, max: f64) -> Self {
        self.ranges.insert(column.to_string(), RangeBounds { min, max });
        self
    }
}

#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub table: Table,
    /// Range filters left out because their column is not numeric.
    pub skipped: Vec<ClientError>,
}

pub fn apply_filters(table: &Table, request: &FilterRequest) -> ClientResult<FilterOutcome> {
    validate_columns(table, request)?;

    let mut mask = vec![true; table.row_count()];
    let mut skipped = Vec::new();

    for (column, accepted) in &request.categorical {
        if accepted.is_empty() {
            continue;
        }
        let Some(index) = table.column_index(column) else {
            continue;
        };
        for (keep, value) in mask.iter_mut().zip(table.column(index)) {
            if !accepted.contains(value) {
                *keep = false;
            }
        }
    }

    for (column, bounds) in &request.ranges {
        match numeric_values(table, column) {
            Ok(values) => {
                for (keep, value) in mask.iter_mut().zip(values) {
                    let inside = value.is_some_and(|number| bounds.contains(number));
                    if !inside {
                        *keep = false;
                    }
                }
            }
            Err(error) if error.code == "unfilterable_column" => {
                log::warn!("skipping range filter on `{column}`: {}", error.message);
                skipped.push(error);
            }
            Err(error) => return Err(error),
        }
    }

    let filtered = table.retain_mask(&mask);
    log::debug!(
        "filters kept {} of {} rows",
        filtered.row_count(),
        table.row_count()
    );

    Ok(FilterOutcome {
        table: filtered,
        skipped,
    })
}

fn validate_columns(table: &Table, request: &FilterRequest) -> ClientResult<()> {
    let columns = request
        .categorical
        .keys()
        .chain(request.ranges.keys())
        .collect::<Vec<&String>>();
    for column in columns {
        if table.column_index(column).is_none() {
            return Err(ClientError::unknown_filter_column(column, table.headers()));
        }
    }

    for (column, bounds) in &request.ranges {
        if !bounds.min.is_finite() || !bounds.max.is_finite() {
            return Err(ClientError::invalid_filter(
                &format!("Range bounds for `{column}` must be finite numbers."),
                column,
            ));
        }
        if bounds.min > bounds.max {
            return Err(ClientError::invalid_filter(
                &format!(
                    "Range for `{column}` has min {} greater than max {}.",
                    bounds.min, bounds.max
                ),
                column,
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{FilterRequest, apply_filters};
    use crate::table::{Table, read_csv};

    fn sample() -> Table {
        let body = "walletName,operation,assetAmount,note\n\
                    W1,DEPOSIT,10,a\n\
                    W2,WITHDRAW,20,b\n\
                    W1,FEE,30,c\n\
                    W3,DEPOSIT,,d\n";
        let table = read_csv(body.as_bytes());
        assert!(table.is_ok());
        table.unwrap_or_default()
    }

    #[test]
    fn empty_request_keeps_every_row() {
        let table = sample();
        let outcome = apply_filters(&table, &FilterRequest::default());
        assert!(outcome.is_ok());
        if let Ok(value) = outcome {
            assert_eq!(value.table, table);
            assert!(value.skipped.is_empty());
        }
    }

    #[test]
    fn empty_value_set_is_not_match_nothing() {
        let table = sample();
        let request = FilterRequest::default().with_values("walletName", Vec::<String>::new());
        assert!(request.is_empty());
        let outcome = apply_filters(&table, &request);
        assert!(outcome.is_ok());
        if let Ok(value) = outcome {
            assert_eq!(value.table.row_count(), 4);
        }
    }

    #[test]
    fn categorical_and_range_constraints_are_anded() {
        let table = sample();
        let request = FilterRequest::default()
            .with_values("walletName", ["W1"])
            .with_range("assetAmount", 0.0, 15.0);
        let outcome = apply_filters(&table, &request);
        assert!(outcome.is_ok());
        if let Ok(value) = outcome {
            assert_eq!(value.table.row_count(), 1);
            assert_eq!(value.table.rows()[0][3], "a");
        }
    }

    #[test]
    fn missing_cells_fail_active_range() {
        let table = sample();
        let request = FilterRequest::default().with_range("assetAmount", 0.0, 100.0);
        let outcome = apply_filters(&table, &request);
        assert!(outcome.is_ok());
        if let Ok(value) = outcome {
            assert_eq!(value.table.row_count(), 3);
        }
    }

    #[test]
    fn non_numeric_range_column_is_skipped_not_failed() {
        let table = sample();
        let request = FilterRequest::default()
            .with_values("operation", ["DEPOSIT"])
            .with_range("note", 0.0, 1.0);
        let outcome = apply_filters(&table, &request);
        assert!(outcome.is_ok());
        if let Ok(value) = outcome {
            assert_eq!(value.table.row_count(), 2);
            assert_eq!(value.skipped.len(), 1);
            assert_eq!(value.skipped[0].code, "unfilterable_column");
        }
    }

    #[test]
    fn unknown_column_is_rejected() {
        let table = sample();
        let request = FilterRequest::default().with_values("wallet", ["W1"]);
        let outcome = apply_filters(&table, &request);
        assert!(outcome.is_err());
        if let Err(error) = outcome {
            assert_eq!(error.code, "unknown_filter_column");
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let table = sample();
        let request = FilterRequest::default().with_range("assetAmount", 5.0, 1.0);
        let outcome = apply_filters(&table, &request);
        assert!(outcome.is_err());
        if let Err(error) = outcome {
            assert_eq!(error.code, "invalid_filter");
        }
    }
}
