use std::io;

use serde_json::Value;

use super::format::{Column, key_value_rows, render_table_or_blocks, terminal_width, value_text};
use super::source_label;

pub fn render_balances(data: &Value) -> io::Result<String> {
    let mut lines = vec![source_label(data), String::new()];

    let mut summary = vec![
        ("Date column:", value_text(&data["date_column"])),
        ("Ledger entries:", value_text(&data["ledger_entries"])),
    ];
    let dropped = data["rows_dropped"].as_u64().unwrap_or(0);
    if dropped > 0 {
        summary.push(("Rows dropped:", format!("{dropped} (unparseable date)")));
    }
    let ignored = data["rows_ignored"].as_u64().unwrap_or(0);
    if ignored > 0 {
        summary.push(("Rows ignored:", format!("{ignored} (other operations)")));
    }
    if let Some(period) = period_label(&data["period"]) {
        summary.push(("Period:", period));
    }
    lines.extend(key_value_rows(&summary, 0));
    lines.push(String::new());

    let balances = data["balances"].as_array().map(Vec::as_slice).unwrap_or(&[]);
    if balances.is_empty() {
        lines.push("No balances for the selected period.".to_string());
        let periods = available_periods(data);
        if !periods.is_empty() {
            lines.push(format!("Periods with data: {}", periods.join(", ")));
        }
        return Ok(lines.join("\n"));
    }

    let rows = balances
        .iter()
        .map(|record| {
            vec![
                value_text(&record["walletName"]),
                value_text(&record["asset"]),
                value_text(&record["year"]),
                value_text(&record["month_name"]),
                value_text(&record["amount"]),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table_or_blocks(
        &[
            Column::left("Wallet"),
            Column::left("Asset"),
            Column::right("Year"),
            Column::left("Month"),
            Column::right("Amount"),
        ],
        &rows,
        terminal_width(),
        "Balance",
    ));

    Ok(lines.join("\n"))
}

fn period_label(period: &Value) -> Option<String> {
    let year = period.get("year")?.as_i64()?;
    let label = match period.get("month").and_then(Value::as_u64) {
        Some(month) => format!("{year}-{month:02}"),
        None => year.to_string(),
    };
    Some(label)
}

fn available_periods(data: &Value) -> Vec<String> {
    data["periods"]
        .as_array()
        .map(|periods| {
            periods
                .iter()
                .map(|period| {
                    format!(
                        "{} {}",
                        value_text(&period["month_name"]),
                        value_text(&period["year"])
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_balances;

    #[test]
    fn renders_balance_table_with_counts() {
        let data = json!({
            "source": {"kind": "file", "path": "rows.csv", "rows_read": 3, "headers": ["a", "b"]},
            "date_column": "dateTime",
            "rows_read": 3,
            "rows_dropped": 1,
            "rows_ignored": 0,
            "ledger_entries": 2,
            "periods": [{"year": 2024, "month": 1, "month_name": "January", "entries": 2}],
            "balances": [
                {"walletName": "W1", "asset": "BTC", "year": 2024, "month": 1, "month_name": "January", "amount": "1.9"}
            ]
        });
        let rendered = render_balances(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Rows dropped:    1 (unparseable date)"));
            assert!(!text.contains("Rows ignored:"));
            assert!(text.contains("Wallet"));
            assert!(text.contains("January"));
            assert!(text.contains("1.9"));
        }
    }

    #[test]
    fn empty_selection_lists_available_periods() {
        let data = json!({
            "source": {"kind": "stdin", "rows_read": 1, "headers": []},
            "date_column": "dateTime",
            "rows_dropped": 0,
            "rows_ignored": 0,
            "ledger_entries": 1,
            "period": {"year": 2023, "month": 5},
            "periods": [{"year": 2024, "month": 1, "month_name": "January", "entries": 1}],
            "balances": []
        });
        let rendered = render_balances(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Period:          2023-05"));
            assert!(text.contains("No balances for the selected period."));
            assert!(text.contains("Periods with data: January 2024"));
        }
    }
}
