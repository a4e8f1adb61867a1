use crate::model::{
    equipment::{event::CreateEquipment, Equipment},
    id::EquipmentId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn create(&self, event: CreateEquipment) -> AppResult<Equipment>;
    async fn find_all(&self) -> AppResult<Vec<Equipment>>;
    async fn find_available(&self) -> AppResult<Vec<Equipment>>;
    async fn find_by_id(&self, equipment_id: EquipmentId) -> AppResult<Option<Equipment>>;
}
