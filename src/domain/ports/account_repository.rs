use crate::domain::entities::account::{Account, AccountDraft, AccountTransaction, AccountUpdate};
use crate::domain::error::DomainError;

pub trait AccountRepository: Send + Sync {
    fn add(&self, draft: &AccountDraft) -> Result<Account, DomainError>;
    fn get(&self, id: i64) -> Result<Option<Account>, DomainError>;
    fn list(&self, include_inactive: bool) -> Result<Vec<Account>, DomainError>;
    fn update(&self, id: i64, update: &AccountUpdate) -> Result<(), DomainError>;
    /// Deactivates every account, then activates exactly the given one.
    fn activate(&self, id: i64) -> Result<(), DomainError>;
    /// Removes the account and its trades in one transaction.
    fn delete(&self, id: i64) -> Result<(), DomainError>;
    /// The single account currently flagged as in use, if any.
    fn active_account_id(&self) -> Result<Option<i64>, DomainError>;
    fn deposit(&self, id: i64, amount: f64, notes: Option<&str>) -> Result<(), DomainError>;
    fn withdraw(&self, id: i64, amount: f64, notes: Option<&str>) -> Result<(), DomainError>;
    fn transactions(&self, id: i64) -> Result<Vec<AccountTransaction>, DomainError>;
}
