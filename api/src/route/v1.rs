use super::{
    course::build_course_routers, equipment::build_equipment_routers,
    facility::build_facility_routers, health::build_health_check_routers,
    reservation::build_reservation_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_reservation_routers())
        .merge(build_course_routers())
        .merge(build_equipment_routers())
        .merge(build_facility_routers());
    Router::new().nest("/api/v1", router)
}
