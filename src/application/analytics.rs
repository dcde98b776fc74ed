use crate::domain::error::DomainError;
use crate::domain::ports::position_repository::{PortfolioItem, PositionRepository};
use crate::domain::ports::trade_repository::{
    DashboardStats, SymbolPerformance, TradeRepository, TradeSummary,
};
use std::sync::Arc;

pub struct AnalyticsUseCase {
    trades: Arc<dyn TradeRepository>,
    positions: Arc<dyn PositionRepository>,
}

impl AnalyticsUseCase {
    pub fn new(trades: Arc<dyn TradeRepository>, positions: Arc<dyn PositionRepository>) -> Self {
        Self { trades, positions }
    }

    pub fn dashboard(&self) -> Result<DashboardStats, DomainError> {
        self.trades.dashboard()
    }

    pub fn performance(&self) -> Result<Vec<SymbolPerformance>, DomainError> {
        self.trades.performance()
    }

    pub fn summary(&self, account_id: i64) -> Result<TradeSummary, DomainError> {
        self.trades.summary(account_id)
    }

    pub fn portfolio(&self) -> Result<Vec<PortfolioItem>, DomainError> {
        self.positions.portfolio()
    }
}
