use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::equipment::{
    register_equipment, show_available_equipment, show_equipment, show_equipment_availability,
    show_equipment_list,
};

pub fn build_equipment_routers() -> Router<AppRegistry> {
    let equipment_routers = Router::new()
        .route("/", post(register_equipment))
        .route("/", get(show_equipment_list))
        .route("/available", get(show_available_equipment))
        .route("/:equipment_id", get(show_equipment))
        .route("/:equipment_id/availability", get(show_equipment_availability));

    Router::new().nest("/equipment", equipment_routers)
}
