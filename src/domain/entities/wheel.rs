use crate::domain::entities::position::Position;
use crate::domain::entities::trade::Trade;
use crate::domain::values::wheel_status::WheelStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One full wheel cycle on a symbol: sell CSPs, take assignment, sell
/// CCs against the shares, get called away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wheel {
    pub wheel_id: i64,
    pub account_id: i64,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: WheelStatus,
    pub current_phase: Option<String>,
    pub total_premium: f64,
    pub total_pnl: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelDraft {
    pub account_id: i64,
    pub symbol: String,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelUpdate {
    pub status: WheelStatus,
    #[serde(default)]
    pub current_phase: Option<String>,
    pub total_premium: f64,
    pub total_pnl: f64,
}

/// A wheel together with the trades and positions linked to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelDetail {
    pub wheel: Wheel,
    pub trades: Vec<Trade>,
    pub positions: Vec<Position>,
}
