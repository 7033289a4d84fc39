use std::path::Path;

use crate::balances::{PeriodSelector, aggregate_balances};
use crate::commands::common::{load_input, source_summary};
use crate::contracts::envelope::{Notice, SuccessEnvelope, success_with_notices};
use crate::contracts::types::BalancesData;
use crate::error::BALANCES_HELP_COMMAND;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct BalancesOptions<'a> {
    pub path: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub config_path: Option<&'a Path>,
    pub stdin_override: Option<Vec<u8>>,
}

pub fn run(
    path: Option<String>,
    year: Option<i32>,
    month: Option<u32>,
    config_path: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(BalancesOptions {
        path,
        year,
        month,
        config_path,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: BalancesOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let period = period_selector(options.year, options.month)?;
    let input = load_input(
        "balances",
        options.path.as_deref(),
        options.config_path,
        options.stdin_override.as_deref(),
    )?;

    let report = aggregate_balances(
        &input.loaded.table,
        &input.config.field_aliases,
        period,
    )?;

    let mut notices = Vec::new();
    if report.rows_dropped > 0 {
        notices.push(Notice {
            code: "rows_dropped".to_string(),
            message: format!(
                "{} of {} rows were left out because `{}` could not be parsed as a date.",
                report.rows_dropped, report.rows_read, report.date_column
            ),
        });
    }

    let data = BalancesData {
        source: source_summary(&input.loaded),
        report,
    };
    success_with_notices("balances", data, notices)
}

fn period_selector(year: Option<i32>, month: Option<u32>) -> ClientResult<Option<PeriodSelector>> {
    match (year, month) {
        (None, None) => Ok(None),
        (None, Some(_)) => Err(ClientError::invalid_argument_for_command(
            "`--month` needs `--year`.",
            Some("balances"),
        )),
        (Some(year), None) => Ok(Some(PeriodSelector::year(year))),
        (Some(year), Some(month)) if (1..=12).contains(&month) => {
            Ok(Some(PeriodSelector::month(year, month)))
        }
        (Some(_), Some(month)) => Err(ClientError::invalid_argument(&format!(
            "Month must be between 1 and 12, got {month}."
        ))
        .with_help(BALANCES_HELP_COMMAND)),
    }
}
