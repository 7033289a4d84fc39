use std::io;

use serde_json::Value;

use super::format::{Column, key_value_rows, render_table_or_blocks, terminal_width, value_text};
use super::source_label;

const MAX_LISTED_OPTIONS: usize = 12;

pub fn render_columns(data: &Value) -> io::Result<String> {
    let width = terminal_width();
    let mut lines = vec![source_label(data), String::new()];

    lines.push("Categorical filters (--where <column>=<value>):".to_string());
    let categorical = array(data, "categorical")
        .iter()
        .map(|column| {
            let options = array(column, "options");
            vec![
                value_text(&column["name"]),
                options.len().to_string(),
                preview_options(options),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    if categorical.is_empty() {
        lines.push("  None of the column names match a filter keyword.".to_string());
    } else {
        lines.extend(render_table_or_blocks(
            &[
                Column::left("Column"),
                Column::right("Distinct"),
                Column::left("Values"),
            ],
            &categorical,
            width,
            "Column",
        ));
    }

    lines.push(String::new());
    lines.push("Numeric ranges (--range <column>=<min>..<max>):".to_string());
    let ranges = array(data, "numeric_ranges")
        .iter()
        .map(|column| {
            vec![
                value_text(&column["name"]),
                value_text(&column["min"]),
                value_text(&column["max"]),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    if ranges.is_empty() {
        lines.push("  No numeric range columns.".to_string());
    } else {
        lines.extend(render_table_or_blocks(
            &[Column::left("Column"), Column::right("Min"), Column::right("Max")],
            &ranges,
            width,
            "Range",
        ));
    }

    let unfilterable = array(data, "unfilterable");
    if !unfilterable.is_empty() {
        lines.push(String::new());
        lines.push("Not range-filterable:".to_string());
        let entries = unfilterable
            .iter()
            .map(|column| {
                (
                    column["name"].as_str().unwrap_or(""),
                    value_text(&column["reason"]),
                )
            })
            .collect::<Vec<(&str, String)>>();
        lines.extend(key_value_rows(&entries, 2));
    }

    Ok(lines.join("\n"))
}

fn array<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn preview_options(options: &[Value]) -> String {
    let mut listed = options
        .iter()
        .take(MAX_LISTED_OPTIONS)
        .map(value_text)
        .collect::<Vec<String>>()
        .join(", ");
    if options.len() > MAX_LISTED_OPTIONS {
        listed.push_str(&format!(", ... (+{} more)", options.len() - MAX_LISTED_OPTIONS));
    }
    listed
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_columns;

    #[test]
    fn lists_each_filter_kind() {
        let data = json!({
            "source": {"kind": "file", "path": "rows.csv", "rows_read": 3, "headers": ["walletName", "assetAmount", "assetvalueInBaseCurrency"]},
            "categorical": [{"name": "walletName", "options": ["W1", "W2"]}],
            "numeric_ranges": [{"name": "assetAmount", "min": -3.0, "max": 10.0}],
            "unfilterable": [{"name": "assetvalueInBaseCurrency", "reason": "row 2 has \"abc\""}]
        });
        let rendered = render_columns(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Source: rows.csv (3 rows, 3 columns)"));
            assert!(text.contains("W1, W2"));
            assert!(text.contains("assetAmount"));
            assert!(text.contains("-3.0"));
            assert!(text.contains("Not range-filterable:"));
        }
    }

    #[test]
    fn long_option_lists_are_truncated() {
        let options = (0..20).map(|index| format!("W{index}")).collect::<Vec<String>>();
        let data = json!({
            "source": {"kind": "stdin", "rows_read": 20, "headers": ["walletName"]},
            "categorical": [{"name": "walletName", "options": options}],
            "numeric_ranges": [],
            "unfilterable": []
        });
        let rendered = render_columns(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Source: stdin"));
            assert!(text.contains("(+8"));
            assert!(!text.contains("Not range-filterable:"));
        }
    }
}
