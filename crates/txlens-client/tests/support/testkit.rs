#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::{Builder, TempDir};
use txlens_client::table::{Table, read_csv};
use txlens_client::{ClientResult, SuccessEnvelope};

pub const EXPORT_HEADER: &str =
    "walletName,assetTicker,feeAsset,operation,operationType,assetAmount,feeAmount,assetvalueInBaseCurrency,dateTime";

pub fn fixture_dir(prefix: &str) -> std::io::Result<TempDir> {
    Builder::new().prefix(prefix).tempdir()
}

pub fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let result = fs::write(&path, body);
    assert!(result.is_ok());
    path
}

/// Writes an empty JSON config so tests never pick up a user config file.
pub fn default_config(dir: &Path) -> PathBuf {
    write_file(dir, "config.json", "{}")
}

pub fn export_csv(rows: &[&str]) -> String {
    let mut body = EXPORT_HEADER.to_string();
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    body
}

pub fn table(body: &str) -> Table {
    let parsed = read_csv(body.as_bytes());
    assert!(parsed.is_ok());
    parsed.unwrap_or_default()
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(body) = value {
            return body;
        }
    }
    Value::Null
}

pub fn column_values(table: &Table, column: &str) -> Vec<String> {
    table
        .column_index(column)
        .map(|index| table.column(index).map(str::to_string).collect())
        .unwrap_or_default()
}
