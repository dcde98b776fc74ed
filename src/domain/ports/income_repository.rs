use crate::domain::entities::income::{Income, IncomeDraft};
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Default)]
pub struct IncomeFilter {
    pub account_id: Option<i64>,
    pub income_type: Option<String>,
}

pub trait IncomeRepository: Send + Sync {
    fn add(&self, draft: &IncomeDraft) -> Result<Income, DomainError>;
    fn list(&self, filter: &IncomeFilter) -> Result<Vec<Income>, DomainError>;
    fn delete(&self, id: i64) -> Result<(), DomainError>;
}
