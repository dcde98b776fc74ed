pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::accounts::AccountUseCase;
use crate::application::analytics::AnalyticsUseCase;
use crate::application::import::{ImportOutcome, ImportPreview, ImportUseCase};
use crate::application::income::IncomeUseCase;
use crate::application::positions::PositionUseCase;
use crate::application::trades::TradeUseCase;
use crate::application::wheels::WheelUseCase;
use crate::domain::entities::account::{Account, AccountDraft, AccountTransaction, AccountUpdate};
use crate::domain::entities::income::{Income, IncomeDraft};
use crate::domain::entities::position::{ClosePosition, Position, PositionDraft, PositionUpdate};
use crate::domain::entities::trade::{CloseTrade, Trade, TradeDraft, TradeUpdate};
use crate::domain::entities::wheel::{Wheel, WheelDetail, WheelDraft, WheelUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::account_repository::AccountRepository;
use crate::domain::ports::income_repository::{IncomeFilter, IncomeRepository};
use crate::domain::ports::position_repository::{PortfolioItem, PositionRepository};
use crate::domain::ports::trade_repository::{
    DashboardStats, SymbolPerformance, TradeRepository, TradeSummary,
};
use crate::domain::ports::wheel_repository::WheelRepository;
use crate::domain::values::position_status::PositionStatus;
use crate::domain::values::trade_status::TradeStatus;
use crate::domain::values::wheel_status::WheelStatus;
use crate::infrastructure::sqlite::account_repo::SqliteAccountRepo;
use crate::infrastructure::sqlite::income_repo::SqliteIncomeRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::position_repo::SqlitePositionRepo;
use crate::infrastructure::sqlite::trade_repo::SqliteTradeRepo;
use crate::infrastructure::sqlite::wheel_repo::SqliteWheelRepo;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::io::Read;
use std::sync::{Arc, Mutex};

pub struct WheelTrack {
    accounts_uc: AccountUseCase,
    trades_uc: TradeUseCase,
    positions_uc: PositionUseCase,
    wheels_uc: WheelUseCase,
    income_uc: IncomeUseCase,
    import_uc: ImportUseCase,
    analytics_uc: AnalyticsUseCase,
}

impl WheelTrack {
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| DomainError::Database(format!("foreign_keys error: {e}")))?;

        run_migrations(&conn)?;
        log::info!("database initialized at {db_path}");

        let conn = Arc::new(Mutex::new(conn));
        let account_repo: Arc<dyn AccountRepository> = Arc::new(SqliteAccountRepo::new(conn.clone()));
        let trade_repo: Arc<dyn TradeRepository> = Arc::new(SqliteTradeRepo::new(conn.clone()));
        let position_repo: Arc<dyn PositionRepository> =
            Arc::new(SqlitePositionRepo::new(conn.clone()));
        let wheel_repo: Arc<dyn WheelRepository> = Arc::new(SqliteWheelRepo::new(conn.clone()));
        let income_repo: Arc<dyn IncomeRepository> = Arc::new(SqliteIncomeRepo::new(conn));

        Ok(Self {
            accounts_uc: AccountUseCase::new(account_repo.clone()),
            trades_uc: TradeUseCase::new(trade_repo.clone(), account_repo),
            positions_uc: PositionUseCase::new(position_repo.clone()),
            wheels_uc: WheelUseCase::new(wheel_repo),
            income_uc: IncomeUseCase::new(income_repo),
            import_uc: ImportUseCase::new(trade_repo.clone()),
            analytics_uc: AnalyticsUseCase::new(trade_repo, position_repo),
        })
    }

    // Accounts

    pub fn account_add(&self, draft: AccountDraft) -> Result<Account, DomainError> {
        self.accounts_uc.add(draft)
    }

    pub fn account(&self, id: i64) -> Result<Account, DomainError> {
        self.accounts_uc.get(id)
    }

    pub fn accounts(&self, include_inactive: bool) -> Result<Vec<Account>, DomainError> {
        self.accounts_uc.list(include_inactive)
    }

    pub fn account_update(&self, id: i64, update: AccountUpdate) -> Result<(), DomainError> {
        self.accounts_uc.update(id, update)
    }

    pub fn account_activate(&self, id: i64) -> Result<(), DomainError> {
        self.accounts_uc.activate(id)
    }

    pub fn account_delete(&self, id: i64) -> Result<(), DomainError> {
        self.accounts_uc.delete(id)
    }

    pub fn deposit(&self, id: i64, amount: f64, notes: Option<&str>) -> Result<(), DomainError> {
        self.accounts_uc.deposit(id, amount, notes)
    }

    pub fn withdraw(&self, id: i64, amount: f64, notes: Option<&str>) -> Result<(), DomainError> {
        self.accounts_uc.withdraw(id, amount, notes)
    }

    pub fn account_transactions(&self, id: i64) -> Result<Vec<AccountTransaction>, DomainError> {
        self.accounts_uc.transactions(id)
    }

    /// The single account currently flagged as in use, if any.
    pub fn active_account_id(&self) -> Result<Option<i64>, DomainError> {
        self.accounts_uc.active_account_id()
    }

    // Trades

    pub fn trade_add(&self, draft: TradeDraft) -> Result<Trade, DomainError> {
        self.trades_uc.add(draft)
    }

    pub fn trade(&self, id: i64) -> Result<Trade, DomainError> {
        self.trades_uc.get(id)
    }

    pub fn trades(
        &self,
        status: Option<TradeStatus>,
        account_id: Option<i64>,
    ) -> Result<Vec<Trade>, DomainError> {
        self.trades_uc.list(status, account_id)
    }

    pub fn trade_update(&self, id: i64, update: TradeUpdate) -> Result<(), DomainError> {
        self.trades_uc.update(id, update)
    }

    pub fn trade_close(&self, id: i64, close: CloseTrade) -> Result<(), DomainError> {
        self.trades_uc.close(id, close)
    }

    pub fn trade_delete(&self, id: i64) -> Result<(), DomainError> {
        self.trades_uc.delete(id)
    }

    // CSV import

    pub fn import_csv<R: Read>(&self, input: R) -> Result<ImportOutcome, DomainError> {
        self.import_uc.import_csv(input)
    }

    pub fn import_csv_as_of<R: Read>(
        &self,
        input: R,
        today: NaiveDate,
    ) -> Result<ImportOutcome, DomainError> {
        self.import_uc.import_csv_as_of(input, today)
    }

    pub fn preview_csv<R: Read>(&self, input: R) -> Result<ImportPreview, DomainError> {
        self.import_uc.preview_csv(input)
    }

    pub fn preview_csv_as_of<R: Read>(
        &self,
        input: R,
        today: NaiveDate,
    ) -> Result<ImportPreview, DomainError> {
        self.import_uc.preview_csv_as_of(input, today)
    }

    pub fn confirm_import(&self, trades: Vec<Trade>) -> Result<ImportOutcome, DomainError> {
        self.import_uc.confirm(trades)
    }

    // Positions

    pub fn position_add(&self, draft: PositionDraft) -> Result<Position, DomainError> {
        self.positions_uc.add(draft)
    }

    pub fn position(&self, id: i64) -> Result<Position, DomainError> {
        self.positions_uc.get(id)
    }

    pub fn positions(&self, status: PositionStatus) -> Result<Vec<Position>, DomainError> {
        self.positions_uc.list(status)
    }

    pub fn position_update(&self, id: i64, update: PositionUpdate) -> Result<(), DomainError> {
        self.positions_uc.update(id, update)
    }

    pub fn position_close(&self, id: i64, close: ClosePosition) -> Result<(), DomainError> {
        self.positions_uc.close(id, close)
    }

    pub fn position_delete(&self, id: i64) -> Result<(), DomainError> {
        self.positions_uc.delete(id)
    }

    // Wheels

    pub fn wheel_add(&self, draft: WheelDraft) -> Result<Wheel, DomainError> {
        self.wheels_uc.add(draft)
    }

    pub fn wheel(&self, id: i64) -> Result<WheelDetail, DomainError> {
        self.wheels_uc.get_detail(id)
    }

    pub fn wheels(&self, status: WheelStatus) -> Result<Vec<Wheel>, DomainError> {
        self.wheels_uc.list(status)
    }

    pub fn wheel_update(&self, id: i64, update: WheelUpdate) -> Result<(), DomainError> {
        self.wheels_uc.update(id, update)
    }

    // Income

    pub fn income_add(&self, draft: IncomeDraft) -> Result<Income, DomainError> {
        self.income_uc.add(draft)
    }

    pub fn incomes(&self, filter: IncomeFilter) -> Result<Vec<Income>, DomainError> {
        self.income_uc.list(filter)
    }

    pub fn income_delete(&self, id: i64) -> Result<(), DomainError> {
        self.income_uc.delete(id)
    }

    // Analytics

    pub fn dashboard(&self) -> Result<DashboardStats, DomainError> {
        self.analytics_uc.dashboard()
    }

    pub fn performance(&self) -> Result<Vec<SymbolPerformance>, DomainError> {
        self.analytics_uc.performance()
    }

    pub fn summary(&self, account_id: i64) -> Result<TradeSummary, DomainError> {
        self.analytics_uc.summary(account_id)
    }

    pub fn portfolio(&self) -> Result<Vec<PortfolioItem>, DomainError> {
        self.analytics_uc.portfolio()
    }
}
