mod common;

use chrono::NaiveDate;
use common::{make_account, setup, CSV_HEADER};
use std::io::Cursor;
use wheeltrack::domain::error::DomainError;
use wheeltrack::domain::values::close_method::CloseMethod;
use wheeltrack::domain::values::trade_status::TradeStatus;
use wheeltrack::WheelTrack;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn imports_a_valid_row_as_open() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let csv = format!("{CSV_HEADER}\n{acc},AAPL,CSP,1,150.00,2.50,2024-01-01,2024-02-01\n");

    let outcome = wt
        .import_csv_as_of(Cursor::new(csv), day(2024, 1, 15))
        .unwrap();

    assert!(outcome.committed);
    assert_eq!(outcome.imported_count, 1);
    assert_eq!(outcome.total_attempted, 1);
    assert!(outcome.parse_errors.is_empty());
    assert!(outcome.transaction_errors.is_empty());

    let trades = wt.trades(Some(TradeStatus::Open), Some(acc)).unwrap();
    assert_eq!(trades.len(), 1);
    assert!(trades[0].trade_id.is_some());
    assert_eq!(trades[0].symbol, "AAPL");
    assert_eq!(trades[0].strike_price, 150.0);
    assert_eq!(trades[0].premium_per_share, 2.5);
}

#[test]
fn derives_expired_when_processing_after_expiration() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let csv = format!("{CSV_HEADER}\n{acc},AAPL,CSP,1,150.00,2.50,2024-01-01,2024-02-01\n");

    let outcome = wt
        .import_csv_as_of(Cursor::new(csv), day(2024, 3, 1))
        .unwrap();
    assert!(outcome.committed);

    let expired = wt.trades(Some(TradeStatus::Expired), Some(acc)).unwrap();
    assert_eq!(expired.len(), 1);
    assert!(wt
        .trades(Some(TradeStatus::Open), Some(acc))
        .unwrap()
        .is_empty());
}

#[test]
fn missing_required_header_rejects_whole_file() {
    let wt = setup();
    make_account(&wt, "Main");
    let csv = "account_id,symbol,trade_type,contracts,strike_price,premium_per_share,open_date\n1,AAPL,CSP,1,150,2.5,2024-01-01\n";

    let err = wt
        .import_csv_as_of(Cursor::new(csv), day(2024, 1, 15))
        .unwrap_err();
    match err {
        DomainError::InvalidInput(msg) => assert!(msg.contains("CSV headers mismatch")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn row_errors_are_collected_with_line_numbers() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let csv = format!(
        "{CSV_HEADER}\n\
         {acc},AAPL,CSP,1,150.00,2.50,2024-01-01,2024-02-01\n\
         {acc},MSFT,CSP,two,400.00,1.10,2024-01-01,2024-02-01\n\
         {acc},aapl,CSP,1,150.00,2.50,2024-01-01,2024-02-01\n\
         {acc},TSLA,CSP,1,200.00,3.00,2024-02-01,2024-01-01\n"
    );

    let outcome = wt
        .import_csv_as_of(Cursor::new(csv), day(2024, 1, 15))
        .unwrap();

    assert!(outcome.committed);
    assert_eq!(outcome.imported_count, 1);
    assert_eq!(outcome.total_attempted, 1);
    assert_eq!(outcome.parse_errors.len(), 3);
    assert!(outcome.parse_errors[0].starts_with("Line 3:"));
    assert!(outcome.parse_errors[0].contains("invalid contracts"));
    assert!(outcome.parse_errors[1].starts_with("Line 4:"));
    assert!(outcome.parse_errors[1].contains("Symbol must contain only uppercase letters"));
    assert!(outcome.parse_errors[2].starts_with("Line 5:"));
    assert!(outcome.parse_errors[2].contains("Expiration date must be equal or after open date"));
}

#[test]
fn inactive_account_rolls_back_the_whole_batch() {
    let wt = setup();
    let acc1 = make_account(&wt, "Main");
    let acc2 = make_account(&wt, "Secondary");
    wt.account_activate(acc1).unwrap();

    let csv = format!(
        "{CSV_HEADER}\n\
         {acc1},AAPL,CSP,1,150.00,2.50,2024-01-01,2024-02-01\n\
         {acc2},MSFT,CC,1,400.00,1.10,2024-01-01,2024-02-01\n\
         {acc1},TSLA,CSP,2,200.00,3.00,2024-01-01,2024-02-01\n"
    );

    let outcome = wt
        .import_csv_as_of(Cursor::new(csv), day(2024, 1, 15))
        .unwrap();

    assert!(!outcome.committed);
    assert_eq!(outcome.message, "transaction rolled back due to errors");
    // Two rows passed the scan, but nothing survived the rollback.
    assert_eq!(outcome.imported_count, 2);
    assert_eq!(outcome.total_attempted, 3);
    assert_eq!(outcome.transaction_errors.len(), 1);
    assert!(outcome.transaction_errors[0].contains("Trade 2 (MSFT)"));
    assert!(outcome.transaction_errors[0].contains("not found or inactive"));

    assert!(wt
        .trades(Some(TradeStatus::Open), Some(acc1))
        .unwrap()
        .is_empty());
    assert!(wt
        .trades(Some(TradeStatus::Open), Some(acc2))
        .unwrap()
        .is_empty());
}

#[test]
fn no_valid_rows_reports_without_persisting() {
    let wt = setup();
    make_account(&wt, "Main");
    let csv = format!("{CSV_HEADER}\nbad,AAPL,CSP,1,150,2.5,2024-01-01,2024-02-01\n");

    let outcome = wt
        .import_csv_as_of(Cursor::new(csv), day(2024, 1, 15))
        .unwrap();

    assert!(!outcome.committed);
    assert_eq!(outcome.message, "No valid trades found in CSV");
    assert_eq!(outcome.imported_count, 0);
    assert_eq!(outcome.total_attempted, 0);
    assert_eq!(outcome.parse_errors.len(), 1);
    assert!(outcome.parse_errors[0].contains("invalid account_id"));
}

#[test]
fn preview_derives_without_side_effects() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let header = format!("{CSV_HEADER},close_price");
    let csv = format!(
        "{header}\n\
         {acc},AAPL,CSP,1,150.00,2.50,2024-01-01,2024-02-01,1.00\n\
         {acc},MSFT,PUT,2,400.00,2.50,2024-01-01,2024-02-01,\n"
    );

    let preview = wt
        .preview_csv_as_of(Cursor::new(csv.clone()), day(2024, 1, 15))
        .unwrap();

    assert_eq!(preview.total_records, 2);
    assert!(preview.parse_errors.is_empty());

    let first = &preview.results[0];
    assert_eq!(first.line_num, 2);
    assert_eq!(first.trade.close_method, Some(CloseMethod::BuyToClose));
    assert_eq!(first.trade.status, TradeStatus::Open);
    assert_eq!(first.profit_loss, Some(1.5));
    assert_eq!(first.missing_fields, vec!["close_date"]);
    assert!(!first.is_valid);

    let second = &preview.results[1];
    assert_eq!(second.profit_loss, None);
    assert_eq!(
        second.missing_fields,
        vec!["close_date", "close_price", "close_method"]
    );

    // Dry run twice: same derivations, and still nothing persisted.
    let again = wt
        .preview_csv_as_of(Cursor::new(csv), day(2024, 1, 15))
        .unwrap();
    assert_eq!(again.total_records, preview.total_records);
    for (a, b) in preview.results.iter().zip(again.results.iter()) {
        assert_eq!(a.line_num, b.line_num);
        assert_eq!(a.trade.status, b.trade.status);
        assert_eq!(a.profit_loss, b.profit_loss);
        assert_eq!(a.missing_fields, b.missing_fields);
        assert_eq!(a.is_valid, b.is_valid);
    }
    assert!(wt
        .trades(Some(TradeStatus::Open), Some(acc))
        .unwrap()
        .is_empty());
}

#[test]
fn preview_scales_profit_loss_by_contracts_for_long_options() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let header = format!("{CSV_HEADER},close_price");
    let csv = format!("{header}\n{acc},SPY,PUT,2,450.00,2.50,2024-01-01,2024-02-01,1.00\n");

    let preview = wt
        .preview_csv_as_of(Cursor::new(csv), day(2024, 1, 15))
        .unwrap();
    assert_eq!(preview.results[0].profit_loss, Some(3.0));
}

#[test]
fn confirm_persists_previewed_trades() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let csv = format!(
        "{CSV_HEADER}\n\
         {acc},AAPL,CSP,1,150.00,2.50,2024-01-01,2024-02-01\n\
         {acc},MSFT,CC,1,400.00,1.10,2024-01-01,2024-02-01\n"
    );

    let preview = wt
        .preview_csv_as_of(Cursor::new(csv), day(2024, 1, 15))
        .unwrap();
    let trades: Vec<_> = preview.results.into_iter().map(|r| r.trade).collect();

    let outcome = wt.confirm_import(trades).unwrap();
    assert!(outcome.committed);
    assert_eq!(outcome.imported_count, 2);
    assert_eq!(outcome.total_attempted, 2);

    assert_eq!(wt.trades(Some(TradeStatus::Open), Some(acc)).unwrap().len(), 2);
}

#[test]
fn confirm_rejects_an_empty_list() {
    let wt = setup();
    let err = wt.confirm_import(Vec::new()).unwrap_err();
    match err {
        DomainError::InvalidInput(msg) => assert!(msg.contains("No trades provided")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn committed_import_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wheel.db");
    let path = path.to_str().unwrap();

    let acc = {
        let wt = WheelTrack::new(path).unwrap();
        let acc = make_account(&wt, "Main");
        let csv = format!("{CSV_HEADER}\n{acc},AAPL,CSP,1,150.00,2.50,2024-01-01,2024-02-01\n");
        let outcome = wt
            .import_csv_as_of(Cursor::new(csv), day(2024, 1, 15))
            .unwrap();
        assert!(outcome.committed);
        acc
    };

    let wt = WheelTrack::new(path).unwrap();
    let trades = wt.trades(Some(TradeStatus::Open), Some(acc)).unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].symbol, "AAPL");
}
