use crate::domain::entities::wheel::{Wheel, WheelDetail, WheelDraft, WheelUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::wheel_repository::WheelRepository;
use crate::domain::values::wheel_status::WheelStatus;
use std::sync::Arc;

pub struct WheelUseCase {
    repo: Arc<dyn WheelRepository>,
}

impl WheelUseCase {
    pub fn new(repo: Arc<dyn WheelRepository>) -> Self {
        Self { repo }
    }

    pub fn add(&self, draft: WheelDraft) -> Result<Wheel, DomainError> {
        if draft.symbol.is_empty() {
            return Err(DomainError::InvalidInput("Symbol is required".into()));
        }
        self.repo.add(&draft)
    }

    pub fn get_detail(&self, id: i64) -> Result<WheelDetail, DomainError> {
        self.repo
            .get_detail(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Wheel not found: {id}")))
    }

    pub fn list(&self, status: WheelStatus) -> Result<Vec<Wheel>, DomainError> {
        self.repo.list(status)
    }

    pub fn update(&self, id: i64, update: WheelUpdate) -> Result<(), DomainError> {
        self.repo.update(id, &update)
    }
}
