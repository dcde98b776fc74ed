use crate::domain::entities::trade::{CloseTrade, Trade, TradeDraft, TradeUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::account_repository::AccountRepository;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::domain::values::trade_status::TradeStatus;
use std::sync::Arc;

pub struct TradeUseCase {
    trades: Arc<dyn TradeRepository>,
    accounts: Arc<dyn AccountRepository>,
}

impl TradeUseCase {
    pub fn new(trades: Arc<dyn TradeRepository>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { trades, accounts }
    }

    /// When the caller omits an account, the currently active account is
    /// resolved here explicitly, never inside parsing or validation.
    fn resolve_account(&self, account_id: Option<i64>) -> Result<i64, DomainError> {
        match account_id {
            Some(id) => Ok(id),
            None => self
                .accounts
                .active_account_id()?
                .ok_or_else(|| DomainError::NotFound("No active account found".into())),
        }
    }

    pub fn add(&self, draft: TradeDraft) -> Result<Trade, DomainError> {
        let account_id = self.resolve_account(draft.account_id)?;
        let trade = Trade::from_draft(draft, account_id);
        trade.validate()?;

        let active = self
            .accounts
            .get(account_id)?
            .map(|a| a.is_active)
            .unwrap_or(false);
        if !active {
            return Err(DomainError::InvalidInput(
                "Associated account does not exist or is not active".into(),
            ));
        }

        self.trades.add(&trade)
    }

    pub fn get(&self, id: i64) -> Result<Trade, DomainError> {
        self.trades
            .get(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Trade not found: {id}")))
    }

    pub fn list(
        &self,
        status: Option<TradeStatus>,
        account_id: Option<i64>,
    ) -> Result<Vec<Trade>, DomainError> {
        let account_id = self.resolve_account(account_id)?;
        self.trades.list(&TradeFilter {
            status,
            account_id: Some(account_id),
        })
    }

    pub fn update(&self, id: i64, update: TradeUpdate) -> Result<(), DomainError> {
        self.trades.update(id, &update)
    }

    pub fn close(&self, id: i64, close: CloseTrade) -> Result<(), DomainError> {
        self.trades.close(id, &close)
    }

    pub fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.trades.delete(id)
    }
}
