use crate::domain::entities::position::{ClosePosition, Position, PositionDraft, PositionUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::position_repository::PositionRepository;
use crate::domain::values::position_status::PositionStatus;
use std::sync::Arc;

pub struct PositionUseCase {
    repo: Arc<dyn PositionRepository>,
}

impl PositionUseCase {
    pub fn new(repo: Arc<dyn PositionRepository>) -> Self {
        Self { repo }
    }

    pub fn add(&self, draft: PositionDraft) -> Result<Position, DomainError> {
        if draft.symbol.is_empty() {
            return Err(DomainError::InvalidInput("Symbol is required".into()));
        }
        if draft.shares <= 0 {
            return Err(DomainError::InvalidInput(
                "Shares must be a positive integer".into(),
            ));
        }
        self.repo.add(&draft)
    }

    pub fn get(&self, id: i64) -> Result<Position, DomainError> {
        self.repo
            .get(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Position not found: {id}")))
    }

    pub fn list(&self, status: PositionStatus) -> Result<Vec<Position>, DomainError> {
        self.repo.list(status)
    }

    pub fn update(&self, id: i64, update: PositionUpdate) -> Result<(), DomainError> {
        self.repo.update(id, &update)
    }

    pub fn close(&self, id: i64, close: ClosePosition) -> Result<(), DomainError> {
        self.repo.close(id, &close)
    }

    pub fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id)
    }
}
