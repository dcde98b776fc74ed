use crate::domain::entities::wheel::{Wheel, WheelDetail, WheelDraft, WheelUpdate};
use crate::domain::error::DomainError;
use crate::domain::values::wheel_status::WheelStatus;

pub trait WheelRepository: Send + Sync {
    fn add(&self, draft: &WheelDraft) -> Result<Wheel, DomainError>;
    fn get(&self, id: i64) -> Result<Option<Wheel>, DomainError>;
    /// The wheel plus its linked trades (by open date) and positions.
    fn get_detail(&self, id: i64) -> Result<Option<WheelDetail>, DomainError>;
    fn list(&self, status: WheelStatus) -> Result<Vec<Wheel>, DomainError>;
    fn update(&self, id: i64, update: &WheelUpdate) -> Result<(), DomainError>;
}
