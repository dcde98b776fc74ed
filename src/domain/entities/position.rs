use crate::domain::values::position_status::PositionStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A stock position, usually acquired via assignment of a CSP leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub position_id: i64,
    pub account_id: i64,
    pub symbol: String,
    pub shares: i64,
    pub cost_basis_per_share: f64,
    pub acquired_date: NaiveDate,
    pub sold_date: Option<NaiveDate>,
    pub sold_price_per_share: Option<f64>,
    pub status: PositionStatus,
    pub is_covered: bool,
    pub wheel_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionDraft {
    pub account_id: i64,
    pub symbol: String,
    pub shares: i64,
    pub cost_basis_per_share: f64,
    pub acquired_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub shares: i64,
    pub cost_basis_per_share: f64,
    #[serde(default)]
    pub is_covered: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosePosition {
    pub sold_date: NaiveDate,
    pub sold_price_per_share: f64,
}
