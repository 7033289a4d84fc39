use std::fs;
use std::path::{Path, PathBuf};

use crate::commands::common::{load_input, source_summary};
use crate::contracts::envelope::{Notice, SuccessEnvelope, success_with_notices};
use crate::contracts::types::{AppliedCategorical, AppliedFilters, AppliedRange, FilterData};
use crate::filter::{FilterRequest, apply_filters, build_request};
use crate::table::write_csv;
use crate::{ClientError, ClientResult};

pub const DEFAULT_EXPORT_FILE: &str = "filtered_report.csv";

#[derive(Debug, Default)]
pub struct FilterOptions<'a> {
    pub path: Option<String>,
    pub where_clauses: Vec<String>,
    pub range_clauses: Vec<String>,
    /// Destination for the filtered CSV. `None` returns the CSV inline.
    pub output: Option<PathBuf>,
    pub config_path: Option<&'a Path>,
    pub stdin_override: Option<Vec<u8>>,
}

pub fn run(
    path: Option<String>,
    where_clauses: Vec<String>,
    range_clauses: Vec<String>,
    output: Option<PathBuf>,
    config_path: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(FilterOptions {
        path,
        where_clauses,
        range_clauses,
        output,
        config_path,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: FilterOptions<'_>) -> ClientResult<SuccessEnvelope> {
    // Malformed clauses fail before any input is read.
    let request = build_request(&options.where_clauses, &options.range_clauses)?;
    let input = load_input(
        "filter",
        options.path.as_deref(),
        options.config_path,
        options.stdin_override.as_deref(),
    )?;

    let outcome = apply_filters(&input.loaded.table, &request)?;
    let body = write_csv(&outcome.table)?;

    let (output_path, csv) = match options.output {
        Some(destination) => {
            fs::write(&destination, &body)
                .map_err(|error| ClientError::export_failed(&destination, &error.to_string()))?;
            log::info!(
                "wrote {} rows to {}",
                outcome.table.row_count(),
                destination.display()
            );
            (Some(destination.display().to_string()), None)
        }
        None => {
            let text = String::from_utf8(body)
                .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
            (None, Some(text))
        }
    };

    let skipped_ranges = outcome
        .skipped
        .iter()
        .filter_map(|error| {
            error
                .data
                .as_ref()
                .and_then(|data| data["column"].as_str())
                .map(str::to_string)
        })
        .collect::<Vec<String>>();
    let notices = outcome
        .skipped
        .iter()
        .map(Notice::from_error)
        .collect::<Vec<Notice>>();

    let data = FilterData {
        source: source_summary(&input.loaded),
        rows_matched: outcome.table.row_count(),
        applied: applied_filters(&request),
        skipped_ranges,
        output_path,
        csv,
    };
    success_with_notices("filter", data, notices)
}

fn applied_filters(request: &FilterRequest) -> AppliedFilters {
    AppliedFilters {
        categorical: request
            .categorical
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(column, values)| AppliedCategorical {
                column: column.clone(),
                values: values.iter().cloned().collect(),
            })
            .collect(),
        ranges: request
            .ranges
            .iter()
            .map(|(column, bounds)| AppliedRange {
                column: column.clone(),
                min: bounds.min,
                max: bounds.max,
            })
            .collect(),
    }
}
