use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::facility::{
    register_facility, show_facility, show_facility_list, show_terrain_list,
};

pub fn build_facility_routers() -> Router<AppRegistry> {
    let facility_routers = Router::new()
        .route("/", post(register_facility))
        .route("/", get(show_facility_list))
        .route("/terrains", get(show_terrain_list))
        .route("/:facility_id", get(show_facility));

    Router::new().nest("/facilities", facility_routers)
}
