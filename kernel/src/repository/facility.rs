use crate::model::{
    facility::{event::CreateFacility, Facility},
    id::FacilityId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait FacilityRepository: Send + Sync {
    async fn create(&self, event: CreateFacility) -> AppResult<Facility>;
    async fn find_all(&self) -> AppResult<Vec<Facility>>;
    async fn find_terrains(&self) -> AppResult<Vec<Facility>>;
    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>>;
}
