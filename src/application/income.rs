use crate::domain::entities::income::{Income, IncomeDraft};
use crate::domain::error::DomainError;
use crate::domain::ports::income_repository::{IncomeFilter, IncomeRepository};
use std::sync::Arc;

pub struct IncomeUseCase {
    repo: Arc<dyn IncomeRepository>,
}

impl IncomeUseCase {
    pub fn new(repo: Arc<dyn IncomeRepository>) -> Self {
        Self { repo }
    }

    pub fn add(&self, draft: IncomeDraft) -> Result<Income, DomainError> {
        if draft.income_type.is_empty() {
            return Err(DomainError::InvalidInput("income_type is required".into()));
        }
        self.repo.add(&draft)
    }

    pub fn list(&self, filter: IncomeFilter) -> Result<Vec<Income>, DomainError> {
        self.repo.list(&filter)
    }

    pub fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id)
    }
}
