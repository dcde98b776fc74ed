use crate::domain::entities::trade::{CloseTrade, Trade, TradeUpdate};
use crate::domain::error::DomainError;
use crate::domain::values::trade_status::TradeStatus;

#[derive(Debug, Clone, Default)]
pub struct TradeFilter {
    pub status: Option<TradeStatus>,
    pub account_id: Option<i64>,
}

/// Result of a batch save. `imported_count` counts rows that passed the
/// in-transaction checks during the scan; when `errors` is non-empty the
/// whole transaction was rolled back and none of those rows survived.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub imported_count: usize,
    pub errors: Vec<String>,
}

impl BatchOutcome {
    pub fn committed(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DashboardStats {
    pub total_trades: usize,
    pub open_trades: usize,
    pub closed_trades: usize,
    pub win_rate: f64,
    pub open_trades_net_premium: f64,
    pub premium_collected: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SymbolPerformance {
    pub symbol: String,
    pub trades: usize,
    pub total_premium: f64,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct TradeSummary {
    pub total_trades: usize,
    pub open_trades: usize,
    pub total_premium: f64,
}

pub trait TradeRepository: Send + Sync {
    /// Inserts a single trade and returns it with its assigned id.
    fn add(&self, trade: &Trade) -> Result<Trade, DomainError>;
    fn get(&self, id: i64) -> Result<Option<Trade>, DomainError>;
    fn list(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError>;
    fn update(&self, id: i64, update: &TradeUpdate) -> Result<(), DomainError>;
    fn close(&self, id: i64, close: &CloseTrade) -> Result<(), DomainError>;
    fn delete(&self, id: i64) -> Result<(), DomainError>;
    /// All-or-nothing batch insert. Re-checks that each trade's account
    /// is active inside the transaction, collects per-row errors without
    /// short-circuiting, and rolls everything back if any row failed.
    fn save_batch(&self, trades: &[Trade]) -> Result<BatchOutcome, DomainError>;
    fn dashboard(&self) -> Result<DashboardStats, DomainError>;
    fn performance(&self) -> Result<Vec<SymbolPerformance>, DomainError>;
    fn summary(&self, account_id: i64) -> Result<TradeSummary, DomainError>;
}
