mod balances_text;
mod columns_text;
mod error_text;
mod filter_text;
mod format;
mod json;
mod mode;

use std::io;

use serde_json::Value;
use txlens_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "columns" => columns_text::render_columns(&success.data),
        "filter" => filter_text::render_filter(&success.data),
        "balances" => balances_text::render_balances(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}

/// First line of text output: where the rows came from and their shape.
fn source_label(data: &Value) -> String {
    let source = &data["source"];
    let name = source["path"].as_str().unwrap_or("stdin");
    let rows = source["rows_read"].as_u64().unwrap_or(0);
    let columns = source["headers"].as_array().map(Vec::len).unwrap_or(0);
    format!("Source: {name} ({rows} rows, {columns} columns)")
}
