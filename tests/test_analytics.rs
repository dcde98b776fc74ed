mod common;

use chrono::NaiveDate;
use common::{make_account, setup};
use wheeltrack::domain::entities::trade::{CloseTrade, TradeDraft};
use wheeltrack::domain::values::close_method::CloseMethod;
use wheeltrack::domain::values::trade_type::TradeType;
use wheeltrack::WheelTrack;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add_trade(wt: &WheelTrack, acc: i64, symbol: &str, premium: f64, fees: f64) -> i64 {
    wt.trade_add(TradeDraft {
        account_id: Some(acc),
        symbol: symbol.to_string(),
        trade_type: TradeType::Csp,
        contracts: 1,
        strike_price: 150.0,
        premium_per_share: premium,
        open_date: day(2024, 1, 1),
        expiration_date: day(2024, 2, 1),
        fees,
        tags: None,
        notes: None,
    })
    .unwrap()
    .trade_id
    .unwrap()
}

fn close_at(wt: &WheelTrack, id: i64, close_price: f64) {
    wt.trade_close(
        id,
        CloseTrade {
            close_date: day(2024, 1, 20),
            close_method: CloseMethod::BuyToClose,
            close_price: Some(close_price),
        },
    )
    .unwrap();
}

#[test]
fn dashboard_aggregates_counts_and_premiums() {
    let wt = setup();
    let acc = make_account(&wt, "Main");

    add_trade(&wt, acc, "AAPL", 2.0, 0.0);
    add_trade(&wt, acc, "MSFT", 2.0, 0.0);
    let closed = add_trade(&wt, acc, "TSLA", 2.0, 0.0);
    close_at(&wt, closed, 0.5);

    let dashboard = wt.dashboard().unwrap();
    assert_eq!(dashboard.total_trades, 3);
    assert_eq!(dashboard.open_trades, 2);
    assert_eq!(dashboard.closed_trades, 1);
    // 2 open trades x (2.0 x 1 x 100) premium
    assert_eq!(dashboard.open_trades_net_premium, 400.0);
    // (2.0 - 0.5) x 1 x 100 on the closed trade
    assert_eq!(dashboard.premium_collected, 150.0);
    assert!((dashboard.win_rate - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn dashboard_is_zeroed_on_an_empty_database() {
    let wt = setup();
    let dashboard = wt.dashboard().unwrap();
    assert_eq!(dashboard.total_trades, 0);
    assert_eq!(dashboard.win_rate, 0.0);
    assert_eq!(dashboard.open_trades_net_premium, 0.0);
}

#[test]
fn performance_ranks_symbols_by_closed_premium() {
    let wt = setup();
    let acc = make_account(&wt, "Main");

    let small = add_trade(&wt, acc, "AAPL", 1.0, 0.0);
    close_at(&wt, small, 0.0);
    let big = add_trade(&wt, acc, "MSFT", 5.0, 0.0);
    close_at(&wt, big, 0.0);
    add_trade(&wt, acc, "TSLA", 9.0, 0.0); // still open, excluded

    let performance = wt.performance().unwrap();
    assert_eq!(performance.len(), 2);
    assert_eq!(performance[0].symbol, "MSFT");
    assert_eq!(performance[0].total_premium, 500.0);
    assert_eq!(performance[1].symbol, "AAPL");
    assert_eq!(performance[1].trades, 1);
}

#[test]
fn summary_is_scoped_to_one_account() {
    let wt = setup();
    let acc1 = make_account(&wt, "Main");
    let acc2 = make_account(&wt, "Secondary");

    add_trade(&wt, acc1, "AAPL", 2.5, 1.0);
    let closed = add_trade(&wt, acc1, "MSFT", 2.0, 0.5);
    close_at(&wt, closed, 0.0);
    add_trade(&wt, acc2, "TSLA", 9.0, 0.0);

    let summary = wt.summary(acc1).unwrap();
    assert_eq!(summary.total_trades, 2);
    assert_eq!(summary.open_trades, 1);
    // (2.0 x 1 x 100) - 0.5 fees on the closed trade
    assert_eq!(summary.total_premium, 199.5);
}
