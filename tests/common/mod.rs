//! Shared test helpers.

use wheeltrack::domain::entities::account::AccountDraft;
use wheeltrack::WheelTrack;

pub fn setup() -> WheelTrack {
    WheelTrack::new(":memory:").unwrap()
}

pub fn make_account(wt: &WheelTrack, name: &str) -> i64 {
    wt.account_add(AccountDraft {
        name: name.to_string(),
        broker: "Interactive Brokers".to_string(),
        currency: "USD".to_string(),
        initial_balance: 10_000.0,
        current_balance: None,
    })
    .unwrap()
    .account_id
}

#[allow(dead_code)]
pub const CSV_HEADER: &str =
    "account_id,symbol,trade_type,contracts,strike_price,premium_per_share,open_date,expiration_date";
