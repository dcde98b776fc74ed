use crate::domain::entities::position::{ClosePosition, Position, PositionDraft, PositionUpdate};
use crate::domain::error::DomainError;
use crate::domain::values::position_status::PositionStatus;

/// Open shares of one symbol aggregated across accounts.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PortfolioItem {
    pub symbol: String,
    pub total_shares: i64,
    pub accounts: Vec<i64>,
}

pub trait PositionRepository: Send + Sync {
    fn add(&self, draft: &PositionDraft) -> Result<Position, DomainError>;
    fn get(&self, id: i64) -> Result<Option<Position>, DomainError>;
    fn list(&self, status: PositionStatus) -> Result<Vec<Position>, DomainError>;
    fn update(&self, id: i64, update: &PositionUpdate) -> Result<(), DomainError>;
    fn close(&self, id: i64, close: &ClosePosition) -> Result<(), DomainError>;
    fn delete(&self, id: i64) -> Result<(), DomainError>;
    fn portfolio(&self) -> Result<Vec<PortfolioItem>, DomainError>;
}
