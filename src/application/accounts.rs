use crate::domain::entities::account::{Account, AccountDraft, AccountTransaction, AccountUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::account_repository::AccountRepository;
use std::sync::Arc;

pub struct AccountUseCase {
    repo: Arc<dyn AccountRepository>,
}

impl AccountUseCase {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    pub fn add(&self, draft: AccountDraft) -> Result<Account, DomainError> {
        if draft.name.is_empty() {
            return Err(DomainError::InvalidInput("Account name is required".into()));
        }
        self.repo.add(&draft)
    }

    pub fn get(&self, id: i64) -> Result<Account, DomainError> {
        self.repo
            .get(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Account not found: {id}")))
    }

    pub fn list(&self, include_inactive: bool) -> Result<Vec<Account>, DomainError> {
        self.repo.list(include_inactive)
    }

    pub fn update(&self, id: i64, update: AccountUpdate) -> Result<(), DomainError> {
        self.repo.update(id, &update)
    }

    pub fn activate(&self, id: i64) -> Result<(), DomainError> {
        self.repo.activate(id)
    }

    pub fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id)
    }

    pub fn deposit(&self, id: i64, amount: f64, notes: Option<&str>) -> Result<(), DomainError> {
        self.repo.deposit(id, amount, notes)
    }

    pub fn withdraw(&self, id: i64, amount: f64, notes: Option<&str>) -> Result<(), DomainError> {
        self.repo.withdraw(id, amount, notes)
    }

    pub fn transactions(&self, id: i64) -> Result<Vec<AccountTransaction>, DomainError> {
        self.repo.transactions(id)
    }

    pub fn active_account_id(&self) -> Result<Option<i64>, DomainError> {
        self.repo.active_account_id()
    }
}
