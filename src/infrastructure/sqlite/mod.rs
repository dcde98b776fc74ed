pub mod account_repo;
pub mod income_repo;
pub mod migrations;
pub mod position_repo;
pub mod trade_repo;
pub mod wheel_repo;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// All repos share one connection so that cross-table transactions
/// (batch import, cascade delete, activate-exactly-one) see the same
/// database — also required for `:memory:` databases in tests.
pub type SharedConnection = Arc<Mutex<Connection>>;

pub(crate) fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| {
            log::warn!("invalid timestamp '{s}' in row, defaulting to now");
            Utc::now()
        })
}

pub(crate) fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|_| {
        log::warn!("invalid date '{s}' in row, defaulting to today");
        Utc::now().date_naive()
    })
}

pub(crate) fn parse_opt_date(s: Option<String>) -> Option<NaiveDate> {
    s.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}
