mod common;

use chrono::NaiveDate;
use common::{make_account, setup};
use wheeltrack::domain::entities::position::{ClosePosition, PositionDraft, PositionUpdate};
use wheeltrack::domain::error::DomainError;
use wheeltrack::domain::values::position_status::PositionStatus;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(account_id: i64, symbol: &str, shares: i64) -> PositionDraft {
    PositionDraft {
        account_id,
        symbol: symbol.to_string(),
        shares,
        cost_basis_per_share: 145.0,
        acquired_date: day(2024, 1, 19),
        notes: None,
    }
}

#[test]
fn add_and_list_open_positions() {
    let wt = setup();
    let acc = make_account(&wt, "Main");

    let position = wt.position_add(draft(acc, "AAPL", 100)).unwrap();
    assert_eq!(position.status, PositionStatus::Open);
    assert!(!position.is_covered);

    let open = wt.positions(PositionStatus::Open).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].symbol, "AAPL");
    assert_eq!(open[0].shares, 100);
}

#[test]
fn add_rejects_non_positive_shares() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    assert!(wt.position_add(draft(acc, "AAPL", 0)).is_err());
}

#[test]
fn update_marks_position_covered() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let position = wt.position_add(draft(acc, "AAPL", 100)).unwrap();

    wt.position_update(
        position.position_id,
        PositionUpdate {
            shares: 100,
            cost_basis_per_share: 144.5,
            is_covered: true,
            notes: Some("CC sold against it".into()),
        },
    )
    .unwrap();

    let updated = wt.position(position.position_id).unwrap();
    assert!(updated.is_covered);
    assert_eq!(updated.cost_basis_per_share, 144.5);
}

#[test]
fn close_sets_sale_fields_and_status() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let position = wt.position_add(draft(acc, "AAPL", 100)).unwrap();

    wt.position_close(
        position.position_id,
        ClosePosition {
            sold_date: day(2024, 3, 15),
            sold_price_per_share: 155.0,
        },
    )
    .unwrap();

    assert!(wt.positions(PositionStatus::Open).unwrap().is_empty());
    let closed = wt.positions(PositionStatus::Closed).unwrap();
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].sold_date, Some(day(2024, 3, 15)));
    assert_eq!(closed[0].sold_price_per_share, Some(155.0));
}

#[test]
fn delete_removes_the_position() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let position = wt.position_add(draft(acc, "AAPL", 100)).unwrap();

    wt.position_delete(position.position_id).unwrap();
    assert!(matches!(
        wt.position(position.position_id),
        Err(DomainError::NotFound(_))
    ));
}

#[test]
fn portfolio_groups_open_shares_by_symbol() {
    let wt = setup();
    let acc1 = make_account(&wt, "Main");
    let acc2 = make_account(&wt, "Secondary");

    wt.position_add(draft(acc1, "AAPL", 100)).unwrap();
    wt.position_add(draft(acc2, "AAPL", 50)).unwrap();
    wt.position_add(draft(acc1, "MSFT", 30)).unwrap();
    let sold = wt.position_add(draft(acc1, "AAPL", 200)).unwrap();
    wt.position_close(
        sold.position_id,
        ClosePosition {
            sold_date: day(2024, 2, 1),
            sold_price_per_share: 160.0,
        },
    )
    .unwrap();

    let portfolio = wt.portfolio().unwrap();
    assert_eq!(portfolio.len(), 2);
    assert_eq!(portfolio[0].symbol, "AAPL");
    assert_eq!(portfolio[0].total_shares, 150);
    assert_eq!(portfolio[0].accounts, vec![acc1, acc2]);
    assert_eq!(portfolio[1].symbol, "MSFT");
    assert_eq!(portfolio[1].total_shares, 30);
}
