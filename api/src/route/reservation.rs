use axum::{
    routing::{get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, create_reservation, show_my_reservations, show_reservation_list,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservation_routers = Router::new()
        .route("/", post(create_reservation))
        .route("/", get(show_reservation_list))
        .route("/me", get(show_my_reservations))
        .route("/:reservation_id/cancel", patch(cancel_reservation));

    Router::new().nest("/reservations", reservation_routers)
}
