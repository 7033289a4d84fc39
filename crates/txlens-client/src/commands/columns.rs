use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{load_input, source_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    CategoricalColumn, ColumnsData, NumericRangeColumn, UnfilterableColumn,
};
use crate::filter::{column_options, numeric_range};
use crate::schema::classify_columns;

#[derive(Debug, Default)]
pub struct ColumnsOptions<'a> {
    pub path: Option<String>,
    pub config_path: Option<&'a Path>,
    pub stdin_override: Option<Vec<u8>>,
}

pub fn run(path: Option<String>, config_path: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ColumnsOptions {
        path,
        config_path,
        stdin_override: None,
    })
}

/// Lists the filters a table supports: categorical columns with their
/// options, and range columns with observed bounds. Range candidates that
/// hold non-numeric values are reported as unfilterable instead of failing.
#[doc(hidden)]
pub fn run_with_options(options: ColumnsOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let input = load_input(
        "columns",
        options.path.as_deref(),
        options.config_path,
        options.stdin_override.as_deref(),
    )?;
    let table = &input.loaded.table;
    let classification = classify_columns(table.headers(), &input.config);

    let mut categorical = Vec::with_capacity(classification.categorical.len());
    for name in classification.categorical {
        let options = column_options(table, &name)?;
        categorical.push(CategoricalColumn { name, options });
    }

    let mut numeric_ranges = Vec::new();
    let mut unfilterable = Vec::new();
    for name in classification.numeric_range_candidates {
        match numeric_range(table, &name) {
            Ok(bounds) => numeric_ranges.push(NumericRangeColumn {
                name,
                min: bounds.map(|value| value.min),
                max: bounds.map(|value| value.max),
            }),
            Err(error) if error.code == "unfilterable_column" => {
                log::debug!("`{name}` is not range-filterable: {}", error.message);
                unfilterable.push(UnfilterableColumn {
                    name,
                    reason: error.message,
                });
            }
            Err(error) => return Err(error),
        }
    }

    let data = ColumnsData {
        source: source_summary(&input.loaded),
        categorical,
        numeric_ranges,
        unfilterable,
    };
    success("columns", data)
}
