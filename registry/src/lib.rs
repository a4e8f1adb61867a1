use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    course::CourseRepositoryImpl, equipment::EquipmentRepositoryImpl,
    facility::FacilityRepositoryImpl, health::HealthCheckRepositoryImpl,
    reservation::ReservationRepositoryImpl,
};
use kernel::repository::{
    course::CourseRepository, equipment::EquipmentRepository, facility::FacilityRepository,
    health::HealthCheckRepository, reservation::ReservationRepository,
};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    course_repository: Arc<dyn CourseRepository>,
    equipment_repository: Arc<dyn EquipmentRepository>,
    facility_repository: Arc<dyn FacilityRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let course_repository = Arc::new(CourseRepositoryImpl::new(pool.clone()));
        let equipment_repository = Arc::new(EquipmentRepositoryImpl::new(pool.clone()));
        let facility_repository = Arc::new(FacilityRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            reservation_repository,
            course_repository,
            equipment_repository,
            facility_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn course_repository(&self) -> Arc<dyn CourseRepository> {
        self.course_repository.clone()
    }

    pub fn equipment_repository(&self) -> Arc<dyn EquipmentRepository> {
        self.equipment_repository.clone()
    }

    pub fn facility_repository(&self) -> Arc<dyn FacilityRepository> {
        self.facility_repository.clone()
    }
}
