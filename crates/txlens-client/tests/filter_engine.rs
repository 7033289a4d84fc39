mod support;

use support::testkit::{column_values, export_csv, table};
use txlens_client::config::AnalysisConfig;
use txlens_client::filter::{FilterRequest, apply_filters, column_options, numeric_range};
use txlens_client::schema::classify_columns;
use txlens_client::table::{Table, write_csv};

fn transactions() -> Table {
    table(&export_csv(&[
        "W1,BTC,,DEPOSIT,crypto,2,,100,2024-01-05",
        "W1,BTC,BTC,FEE,crypto,,0.1,5,2024-01-06",
        "W2,ETH,,WITHDRAW,crypto,-3,,50,2024-02-01",
        "W2,ETH,,DEPOSIT,crypto,10,,200,2024-02-03",
        "W3,SOL,,DEPOSIT,staking,5,,,2024-03-01",
    ]))
}

fn filtered(table: &Table, request: &FilterRequest) -> Table {
    let outcome = apply_filters(table, request);
    assert!(outcome.is_ok());
    outcome.map(|value| value.table).unwrap_or_default()
}

#[test]
fn sequential_filters_equal_their_union() {
    let source = transactions();
    let wallets = FilterRequest::default().with_values("walletName", ["W2"]);
    let amounts = FilterRequest::default().with_range("assetAmount", 0.0, 10.0);
    let union = FilterRequest::default()
        .with_values("walletName", ["W2"])
        .with_range("assetAmount", 0.0, 10.0);

    let wallets_then_amounts = filtered(&filtered(&source, &wallets), &amounts);
    let amounts_then_wallets = filtered(&filtered(&source, &amounts), &wallets);
    let combined = filtered(&source, &union);

    assert_eq!(wallets_then_amounts, combined);
    assert_eq!(amounts_then_wallets, combined);
    assert_eq!(column_values(&combined, "assetAmount"), vec!["10"]);
}

#[test]
fn range_bounds_are_inclusive() {
    let source = transactions();

    let inclusive = filtered(
        &source,
        &FilterRequest::default().with_range("assetAmount", 2.0, 10.0),
    );
    assert_eq!(column_values(&inclusive, "assetAmount"), vec!["2", "10", "5"]);

    let narrowed = filtered(
        &source,
        &FilterRequest::default().with_range("assetAmount", 2.0001, 9.9999),
    );
    assert_eq!(column_values(&narrowed, "assetAmount"), vec!["5"]);
}

#[test]
fn refiltering_is_idempotent() {
    let source = transactions();
    let request = FilterRequest::default()
        .with_values("operation", ["DEPOSIT", "FEE"])
        .with_range("assetvalueInBaseCurrency", 0.0, 150.0);

    let once = filtered(&source, &request);
    let twice = filtered(&once, &request);
    assert_eq!(once, twice);
    assert_eq!(once.row_count(), 2);
}

#[test]
fn empty_request_returns_table_unchanged() {
    let source = transactions();
    let result = filtered(&source, &FilterRequest::default());
    assert_eq!(result, source);
}

#[test]
fn no_match_exports_header_only() {
    let source = transactions();
    let result = filtered(
        &source,
        &FilterRequest::default().with_values("walletName", ["W9"]),
    );
    assert!(result.is_empty());

    let bytes = write_csv(&result);
    assert!(bytes.is_ok());
    if let Ok(body) = bytes {
        let text = String::from_utf8_lossy(&body).to_string();
        assert_eq!(text.trim_end(), source.headers().join(","));
    }
}

#[test]
fn categorical_match_is_exact_string() {
    let source = transactions();
    let result = filtered(
        &source,
        &FilterRequest::default().with_values("assetTicker", ["btc", "ETH "]),
    );
    assert!(result.is_empty());
}

#[test]
fn discovery_offers_options_and_bounds() {
    let source = transactions();
    let classification = classify_columns(source.headers(), &AnalysisConfig::default());
    assert_eq!(
        classification.categorical,
        vec![
            "walletName",
            "assetTicker",
            "feeAsset",
            "operation",
            "operationType",
            "assetAmount",
            "assetvalueInBaseCurrency",
        ]
    );

    let wallets = column_options(&source, "walletName");
    assert!(wallets.is_ok());
    if let Ok(values) = wallets {
        assert_eq!(values, vec!["W1", "W2", "W3"]);
    }

    let fee_assets = column_options(&source, "feeAsset");
    assert!(fee_assets.is_ok());
    if let Ok(values) = fee_assets {
        assert_eq!(values, vec!["BTC"]);
    }

    let bounds = numeric_range(&source, "assetAmount");
    assert!(bounds.is_ok());
    if let Ok(Some(range)) = bounds {
        assert_eq!((range.min, range.max), (-3.0, 10.0));
    }
}

#[test]
fn non_numeric_range_is_skipped_with_other_filters_applied() {
    let source = transactions();
    let request = FilterRequest::default()
        .with_values("walletName", ["W1"])
        .with_range("operationType", 0.0, 1.0);
    let outcome = apply_filters(&source, &request);
    assert!(outcome.is_ok());
    if let Ok(value) = outcome {
        assert_eq!(value.table.row_count(), 2);
        assert_eq!(value.skipped.len(), 1);
        assert_eq!(value.skipped[0].code, "unfilterable_column");
    }
}
