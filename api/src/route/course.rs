use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::course::{delete_course, register_course, show_course, show_course_list};

pub fn build_course_routers() -> Router<AppRegistry> {
    let course_routers = Router::new()
        .route("/", post(register_course))
        .route("/", get(show_course_list))
        .route("/:course_id", get(show_course))
        .route("/:course_id", delete(delete_course));

    Router::new().nest("/courses", course_routers)
}
