use std::path::PathBuf;

use chrono::Month;
use clap::{Parser, Subcommand};
use txlens_client::commands::filter::DEFAULT_EXPORT_FILE;

/// Accepts `1`-`12` or an English month name (`March`, `mar`).
pub fn parse_month(value: &str) -> Result<u32, String> {
    let trimmed = value.trim();
    if let Ok(number) = trimmed.parse::<u32>() {
        if (1..=12).contains(&number) {
            return Ok(number);
        }
        return Err("month must be between 1 and 12".to_string());
    }

    trimmed
        .parse::<Month>()
        .map(|month| month.number_from_month())
        .map_err(|_| "month must be 1-12 or an English month name".to_string())
}

/// Extended help shown after `txlens filter --help`.
pub const FILTER_AFTER_HELP: &str = "\
Filters:
  --where <column>=<value>     Keep rows whose cell equals <value> exactly.
                               Repeat on one column to accept several values.
  --range <column>=<min>..<max>
                               Keep rows whose numeric cell is within the
                               bounds, both inclusive. Empty cells never match.

  Every filter must hold for a row to be kept.
  Run `txlens columns <path>` to list filterable columns and their values.

Output:
  Without --output the filtered CSV is written to stdout.
  `--output` alone writes `filtered_report.csv`; `--output <file>` picks the name.
  Put <path> before --output, or use `--output=<file>`.

Examples:
  txlens filter rows.csv --where walletName=W1 --where walletName=W2
  txlens filter rows.csv --range assetAmount=0..2.5 --output
  cat rows.csv | txlens filter - --where operation=DEPOSIT
";

/// Extended help shown after `txlens balances --help`.
pub const BALANCES_AFTER_HELP: &str = "\
How balances are computed:
  DEPOSIT adds |assetAmount| to the asset column's ticker.
  WITHDRAW subtracts |assetAmount| from the asset column's ticker.
  FEE subtracts |feeAmount| from `feeAsset`.
  Other operations are ignored. Rows whose date cannot be parsed are dropped
  and counted.

Required columns:
  walletName, assetTicker (or asset), feeAsset, operation, assetAmount,
  feeAmount, and dateTime (or the first column whose name contains `date`).
  Rename columns through `field_aliases` in the config file.

Examples:
  txlens balances rows.csv
  txlens balances rows.csv --year 2024 --month march
";

#[derive(Debug, Parser)]
#[command(
    name = "txlens",
    version,
    about = "filter transaction exports and summarize wallet balances",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Load analysis settings from this JSON file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List categorical filters, numeric ranges, and unfilterable columns
    Columns {
        /// Path to a transaction CSV (use `-` for stdin)
        path: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Keep rows matching every filter and export them as CSV
    #[command(after_long_help = FILTER_AFTER_HELP)]
    Filter {
        /// Path to a transaction CSV (use `-` for stdin)
        path: Option<String>,
        /// Categorical filter, `<column>=<value>` (repeatable)
        #[arg(long = "where", value_name = "COLUMN=VALUE")]
        where_clauses: Vec<String>,
        /// Inclusive numeric range, `<column>=<min>..<max>` (repeatable)
        #[arg(long = "range", value_name = "COLUMN=MIN..MAX", allow_hyphen_values = true)]
        range_clauses: Vec<String>,
        /// Write the filtered CSV to a file instead of stdout
        #[arg(
            long,
            value_name = "FILE",
            num_args = 0..=1,
            default_missing_value = DEFAULT_EXPORT_FILE
        )]
        output: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Sum signed amounts per wallet, asset, year, and month
    #[command(after_long_help = BALANCES_AFTER_HELP)]
    Balances {
        /// Path to a transaction CSV (use `-` for stdin)
        path: Option<String>,
        /// Only include this year
        #[arg(long)]
        year: Option<i32>,
        /// Only include this month of --year (1-12 or a month name)
        #[arg(long, requires = "year", value_parser = parse_month)]
        month: Option<u32>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
