mod common;

use chrono::NaiveDate;
use common::{make_account, setup};
use wheeltrack::domain::entities::trade::{Trade, TradeDraft};
use wheeltrack::domain::entities::wheel::{WheelDraft, WheelUpdate};
use wheeltrack::domain::error::DomainError;
use wheeltrack::domain::values::trade_type::TradeType;
use wheeltrack::domain::values::wheel_status::WheelStatus;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn wheel_draft(account_id: i64, symbol: &str) -> WheelDraft {
    WheelDraft {
        account_id,
        symbol: symbol.to_string(),
        start_date: day(2024, 1, 1),
    }
}

#[test]
fn new_wheel_starts_active_in_csp_phase() {
    let wt = setup();
    let acc = make_account(&wt, "Main");

    let wheel = wt.wheel_add(wheel_draft(acc, "AAPL")).unwrap();
    assert_eq!(wheel.status, WheelStatus::Active);
    assert_eq!(wheel.current_phase.as_deref(), Some("CSP"));
    assert_eq!(wheel.total_premium, 0.0);
    assert_eq!(wheel.total_pnl, 0.0);

    let active = wt.wheels(WheelStatus::Active).unwrap();
    assert_eq!(active.len(), 1);
}

#[test]
fn update_moves_wheel_between_statuses() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let wheel = wt.wheel_add(wheel_draft(acc, "AAPL")).unwrap();

    wt.wheel_update(
        wheel.wheel_id,
        WheelUpdate {
            status: WheelStatus::Completed,
            current_phase: Some("CC".into()),
            total_premium: 420.0,
            total_pnl: 610.0,
        },
    )
    .unwrap();

    assert!(wt.wheels(WheelStatus::Active).unwrap().is_empty());
    let completed = wt.wheels(WheelStatus::Completed).unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].total_premium, 420.0);
    assert_eq!(completed[0].current_phase.as_deref(), Some("CC"));
}

#[test]
fn detail_includes_linked_trades() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let wheel = wt.wheel_add(wheel_draft(acc, "AAPL")).unwrap();

    // Linked trades arrive through the confirm path, which carries
    // wheel_id on the reviewed trade objects.
    let mut trade = Trade::from_draft(
        TradeDraft {
            account_id: Some(acc),
            symbol: "AAPL".into(),
            trade_type: TradeType::Csp,
            contracts: 1,
            strike_price: 150.0,
            premium_per_share: 2.5,
            open_date: day(2024, 1, 2),
            expiration_date: day(2024, 2, 2),
            fees: 0.0,
            tags: None,
            notes: None,
        },
        acc,
    );
    trade.wheel_id = Some(wheel.wheel_id);
    let outcome = wt.confirm_import(vec![trade]).unwrap();
    assert!(outcome.committed);

    let detail = wt.wheel(wheel.wheel_id).unwrap();
    assert_eq!(detail.wheel.symbol, "AAPL");
    assert_eq!(detail.trades.len(), 1);
    assert_eq!(detail.trades[0].wheel_id, Some(wheel.wheel_id));
    assert!(detail.positions.is_empty());
}

#[test]
fn missing_wheel_is_not_found() {
    let wt = setup();
    assert!(matches!(wt.wheel(42), Err(DomainError::NotFound(_))));
}
