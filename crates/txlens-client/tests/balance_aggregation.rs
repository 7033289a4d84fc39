mod support;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use support::testkit::{export_csv, table};
use txlens_client::balances::{BalanceReport, PeriodSelector, aggregate_balances};
use txlens_client::config::{DATE_FIELD, FieldAliases};
use txlens_client::table::Table;

fn aggregate(source: &Table, period: Option<PeriodSelector>) -> Option<BalanceReport> {
    let report = aggregate_balances(source, &FieldAliases::default(), period);
    assert!(report.is_ok(), "aggregation failed: {:?}", report.as_ref().err());
    report.ok()
}

#[test]
fn deposit_and_fee_net_to_single_record() {
    let source = table(&export_csv(&[
        "W1,BTC,,DEPOSIT,,2,,,2024-01-05",
        "W1,,BTC,FEE,,,0.1,,2024-01-06",
    ]));
    if let Some(report) = aggregate(&source, None) {
        assert_eq!(report.balances.len(), 1);
        let record = &report.balances[0];
        assert_eq!(
            (
                record.wallet_name.as_str(),
                record.asset.as_str(),
                record.year,
                record.month
            ),
            ("W1", "BTC", 2024, 1)
        );
        assert_eq!(record.amount, dec!(1.9));
        assert_eq!(record.month_name, "January");
    }
}

#[test]
fn withdrawals_subtract_regardless_of_source_sign() {
    let source = table(&export_csv(&[
        "W1,ETH,,DEPOSIT,,100,,,2024-03-01",
        "W1,ETH,,WITHDRAW,,40,,,2024-03-10",
        "W2,ETH,,DEPOSIT,,100,,,2024-03-01",
        "W2,ETH,,WITHDRAW,,-40,,,2024-03-10",
    ]));
    if let Some(report) = aggregate(&source, None) {
        let amounts = report
            .balances
            .iter()
            .map(|record| record.amount)
            .collect::<Vec<Decimal>>();
        assert_eq!(amounts, vec![dec!(60), dec!(60)]);
    }
}

#[test]
fn fees_are_negative_for_either_source_sign() {
    let source = table(&export_csv(&[
        "W1,ETH,BNB,FEE,,,5,,2024-05-01",
        "W2,ETH,BNB,FEE,,,-5,,2024-05-01",
    ]));
    if let Some(report) = aggregate(&source, None) {
        assert_eq!(report.balances.len(), 2);
        for record in &report.balances {
            assert_eq!(record.asset, "BNB");
            assert_eq!(record.amount, dec!(-5));
        }
    }
}

#[test]
fn unparseable_dates_are_dropped_and_counted() {
    let source = table(&export_csv(&[
        "W1,BTC,,DEPOSIT,,1,,,2024-01-05",
        "W1,BTC,,DEPOSIT,,7,,,not-a-date",
        "W1,BTC,,DEPOSIT,,9,,,",
    ]));
    if let Some(report) = aggregate(&source, None) {
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_dropped, 2);
        assert_eq!(report.ledger_entries, 1);
        assert_eq!(report.balances.len(), 1);
        assert_eq!(report.balances[0].amount, dec!(1));
    }
}

#[test]
fn other_operations_are_ignored() {
    let source = table(&export_csv(&[
        "W1,BTC,,TRADE,,3,,,2024-01-05",
        "W1,BTC,,DEPOSIT,,1,,,2024-01-05",
    ]));
    if let Some(report) = aggregate(&source, None) {
        assert_eq!(report.rows_ignored, 1);
        assert_eq!(report.balances.len(), 1);
        assert_eq!(report.balances[0].amount, dec!(1));
    }
}

#[test]
fn missing_date_column_is_fatal() {
    let source = table(
        "walletName,asset,feeAsset,operation,assetAmount,feeAmount\nW1,BTC,,DEPOSIT,1,\n",
    );
    let report = aggregate_balances(&source, &FieldAliases::default(), None);
    assert!(report.is_err());
    if let Err(error) = report {
        assert_eq!(error.code, "missing_date_column");
    }
}

#[test]
fn fallback_date_column_is_used() {
    let source = table(
        "walletName,asset,feeAsset,operation,assetAmount,feeAmount,Settlement Date\n\
         W1,BTC,,DEPOSIT,1,,2024-06-30\n",
    );
    if let Some(report) = aggregate(&source, None) {
        assert_eq!(report.date_column, "Settlement Date");
        assert_eq!(report.balances[0].month_name, "June");
    }
}

#[test]
fn non_numeric_amount_names_the_column() {
    let source = table(&export_csv(&["W1,BTC,,DEPOSIT,,abc,,,2024-01-05"]));
    let report = aggregate_balances(&source, &FieldAliases::default(), None);
    assert!(report.is_err());
    if let Err(error) = report {
        assert_eq!(error.code, "invalid_amount_type");
        assert!(error.message.contains("assetAmount"));
    }
}

#[test]
fn configured_alias_resolves_renamed_columns() {
    let source = table(
        "walletName,asset,feeAsset,operation,assetAmount,feeAmount,Timestamp,createdDate\n\
         W1,BTC,,DEPOSIT,1,,2024-02-01,2023-01-01\n",
    );
    let mut aliases = FieldAliases::default();
    aliases.set(DATE_FIELD, vec!["Timestamp".to_string()]);

    let report = aggregate_balances(&source, &aliases, None);
    assert!(report.is_ok());
    if let Ok(value) = report {
        assert_eq!(value.date_column, "Timestamp");
        assert_eq!(value.balances[0].year, 2024);
    }
}

#[test]
fn period_narrowing_keeps_period_listing() {
    let source = table(&export_csv(&[
        "W1,BTC,,DEPOSIT,,1,,,2024-01-05",
        "W1,BTC,,DEPOSIT,,2,,,2024-02-05",
        "W1,ETH,,DEPOSIT,,3,,,2024-02-07",
    ]));
    if let Some(report) = aggregate(&source, Some(PeriodSelector::month(2024, 2))) {
        assert_eq!(report.periods.len(), 2);
        assert_eq!(report.balances.len(), 2);
        assert!(report.balances.iter().all(|record| record.month == 2));
    }
}

#[test]
fn overflowing_balance_fails_without_panicking() {
    let source = table(&export_csv(&[
        "W1,BTC,,DEPOSIT,,50000000000000000000000000000,,,2024-01-05",
        "W1,BTC,,DEPOSIT,,50000000000000000000000000000,,,2024-01-06",
    ]));
    let report = aggregate_balances(&source, &FieldAliases::default(), None);
    assert!(report.is_err());
    if let Err(error) = report {
        assert_eq!(error.code, "balance_overflow");
        assert!(error.message.contains("`W1`"));
        assert!(error.message.contains("`BTC`"));
        assert!(error.message.contains("2024-01"));
    }
}

#[test]
fn oversized_amount_reports_range_not_type() {
    let source = table(&export_csv(&["W1,BTC,,DEPOSIT,,1e30,,,2024-01-05"]));
    let report = aggregate_balances(&source, &FieldAliases::default(), None);
    assert!(report.is_err());
    if let Err(error) = report {
        assert_eq!(error.code, "amount_out_of_range");
        assert!(!error.message.contains("must be numeric"));
    }
}

#[test]
fn literal_date_time_wins_over_fallback_when_aliases_replaced() {
    let source = table(
        "walletName,asset,feeAsset,operation,assetAmount,feeAmount,createdDate,dateTime\n\
         W1,BTC,,DEPOSIT,1,,2023-01-01,2024-02-01\n",
    );
    let mut aliases = FieldAliases::default();
    aliases.set(DATE_FIELD, vec!["Timestamp".to_string()]);

    let report = aggregate_balances(&source, &aliases, None);
    assert!(report.is_ok());
    if let Ok(value) = report {
        assert_eq!(value.date_column, "dateTime");
        assert_eq!(value.balances[0].year, 2024);
    }
}
