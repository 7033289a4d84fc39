use std::path::Path;

use rust_decimal::Decimal;
use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const BALANCES_HELP_COMMAND: &str = "txlens balances --help";
pub(crate) const FILTER_HELP_COMMAND: &str = "txlens filter --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_help(self, help_command: &str) -> Self {
        let data = self.data.clone().unwrap_or_else(|| json!({}));
        self.with_data(merge_help_data(data, help_command))
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `txlens {cmd} --help` for usage."),
            None => "Run `txlens --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_csv(message: &str) -> Self {
        Self::new(
            "invalid_csv",
            message,
            vec![
                "Provide a UTF-8 CSV file with one header row.".to_string(),
                "Make sure every row has the same number of fields as the header.".to_string(),
            ],
        )
    }

    pub fn duplicate_header(header: &str) -> Self {
        Self::invalid_csv(&format!("CSV header `{header}` appears more than once."))
            .with_data(json!({
                "column": header,
            }))
    }

    pub fn missing_date_column(headers: &[String]) -> Self {
        Self::new(
            "missing_date_column",
            "No date column found. Expected a `dateTime` column or a column whose name contains `date`.",
            vec![
                "Check that the file is a transaction export with a date column.".to_string(),
                "Rename the timestamp column to `dateTime`, or add an alias in the config file."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "actual_headers": headers,
        }))
        .with_help(BALANCES_HELP_COMMAND)
    }

    pub fn missing_required_column(canonical: &str, aliases: &[String], headers: &[String]) -> Self {
        Self::new(
            "missing_required_column",
            &format!("Balance aggregation needs a `{canonical}` column, but none was found."),
            vec![
                format!("Add a `{canonical}` column to the file."),
                "Or map an existing column to it through `field_aliases` in the config file."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "column": canonical,
            "accepted_names": aliases,
            "actual_headers": headers,
        }))
        .with_help(BALANCES_HELP_COMMAND)
    }

    pub fn invalid_amount_type(column: &str, row: usize, value: &str) -> Self {
        Self::new(
            "invalid_amount_type",
            &format!("Column `{column}` must be numeric; row {row} has \"{value}\"."),
            vec![
                format!("Fix the value in `{column}` at row {row}."),
                "Amounts must be plain numbers such as `0.25` or `-12.5`.".to_string(),
            ],
        )
        .with_data(json!({
            "column": column,
            "row": row,
            "received": value,
        }))
        .with_help(BALANCES_HELP_COMMAND)
    }

    pub fn amount_out_of_range(column: &str, row: usize, value: &str) -> Self {
        Self::new(
            "amount_out_of_range",
            &format!(
                "Column `{column}` row {row} has \"{value}\", which is outside the supported amount range."
            ),
            vec![
                format!("Fix the value in `{column}` at row {row}."),
                format!(
                    "Amounts must lie within +/-{} with at most 28 decimal places.",
                    Decimal::MAX
                ),
            ],
        )
        .with_data(json!({
            "column": column,
            "row": row,
            "received": value,
        }))
        .with_help(BALANCES_HELP_COMMAND)
    }

    pub fn balance_overflow(wallet: &str, asset: &str, year: i32, month: u32) -> Self {
        Self::new(
            "balance_overflow",
            &format!(
                "Balance of `{asset}` in wallet `{wallet}` for {year}-{month:02} exceeds the supported amount range."
            ),
            vec![
                format!("Check the `{asset}` amounts of wallet `{wallet}` in {year}-{month:02}."),
                format!("Use `--year {year} --month {month}` to inspect that period alone."),
            ],
        )
        .with_data(json!({
            "walletName": wallet,
            "asset": asset,
            "year": year,
            "month": month,
        }))
        .with_help(BALANCES_HELP_COMMAND)
    }

    pub fn unfilterable_column(column: &str, row: usize, value: &str) -> Self {
        Self::new(
            "unfilterable_column",
            &format!(
                "Column `{column}` cannot be range-filtered; row {row} has non-numeric value \"{value}\"."
            ),
            vec![format!(
                "Use `--where {column}=<value>` to filter this column by exact value instead."
            )],
        )
        .with_data(json!({
            "column": column,
            "row": row,
            "received": value,
        }))
    }

    pub fn unknown_filter_column(column: &str, headers: &[String]) -> Self {
        Self::new(
            "unknown_filter_column",
            &format!("Filter column `{column}` does not exist in this file."),
            vec![
                "Run `txlens columns <path>` to list filterable columns.".to_string(),
                "Column names are case-sensitive.".to_string(),
            ],
        )
        .with_data(json!({
            "column": column,
            "actual_headers": headers,
        }))
        .with_help(FILTER_HELP_COMMAND)
    }

    pub fn invalid_filter(message: &str, clause: &str) -> Self {
        Self::new(
            "invalid_filter",
            message,
            vec![
                "Use `--where <column>=<value>` for categorical filters.".to_string(),
                "Use `--range <column>=<min>..<max>` for numeric ranges (bounds inclusive)."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "clause": clause,
        }))
        .with_help(FILTER_HELP_COMMAND)
    }

    pub fn invalid_config(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "invalid_config",
            &format!("Could not load config file `{location}`: {detail}"),
            vec![
                format!("Fix or remove `{location}`."),
                "Or point `TXLENS_CONFIG` at a valid JSON config file.".to_string(),
            ],
        )
        .with_data(json!({
            "config_path": location,
        }))
    }

    pub fn export_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "export_failed",
            &format!("Could not write filtered CSV to `{location}`: {detail}"),
            vec![format!(
                "Check that the directory for `{location}` exists and is writable."
            )],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

fn merge_help_data(mut data: Value, help_command: &str) -> Value {
    if !data.is_object() {
        data = json!({});
    }

    if let Some(object) = data.as_object_mut() {
        object.insert(
            "help_command".to_string(),
            Value::String(help_command.to_string()),
        );
    }

    data
}

pub type ClientResult<T> = Result<T, ClientError>;
