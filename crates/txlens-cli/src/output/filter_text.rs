use std::io;

use serde_json::Value;

use super::format::{key_value_rows, value_text};

/// Raw CSV when the rows went to stdout, otherwise a short export summary.
pub fn render_filter(data: &Value) -> io::Result<String> {
    if let Some(csv) = data.get("csv").and_then(Value::as_str) {
        return Ok(csv.to_string());
    }

    let Some(output_path) = data.get("output_path").and_then(Value::as_str) else {
        return Err(io::Error::other(
            "filter result has neither CSV rows nor an output path",
        ));
    };

    let rows_read = value_text(&data["source"]["rows_read"]);
    let rows_matched = value_text(&data["rows_matched"]);
    let mut lines = vec![format!(
        "Exported {rows_matched} of {rows_read} rows to {output_path}"
    )];

    let applied = applied_filters(data);
    if !applied.is_empty() {
        lines.push(String::new());
        lines.push("Filters:".to_string());
        lines.extend(key_value_rows(
            &applied
                .iter()
                .map(|(column, rule)| (column.as_str(), rule.clone()))
                .collect::<Vec<(&str, String)>>(),
            2,
        ));
    }

    let skipped = data
        .get("skipped_ranges")
        .and_then(Value::as_array)
        .map(|columns| columns.iter().map(value_text).collect::<Vec<String>>())
        .unwrap_or_default();
    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Skipped range filters on non-numeric columns: {}",
            skipped.join(", ")
        ));
    }

    Ok(lines.join("\n"))
}

fn applied_filters(data: &Value) -> Vec<(String, String)> {
    let mut rules = Vec::new();
    if let Some(categorical) = data["applied"]["categorical"].as_array() {
        for entry in categorical {
            let values = entry["values"]
                .as_array()
                .map(|values| values.iter().map(value_text).collect::<Vec<String>>())
                .unwrap_or_default();
            rules.push((value_text(&entry["column"]), format!("in {{{}}}", values.join(", "))));
        }
    }
    if let Some(ranges) = data["applied"]["ranges"].as_array() {
        for entry in ranges {
            rules.push((
                value_text(&entry["column"]),
                format!(
                    "{} to {} (inclusive)",
                    value_text(&entry["min"]),
                    value_text(&entry["max"])
                ),
            ));
        }
    }
    rules
}
