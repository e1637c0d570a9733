use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::hall::{
    check_availability, register_hall, show_hall, show_hall_list, update_hall,
};

pub fn build_hall_routers() -> Router<AppRegistry> {
    let halls_routers = Router::new()
        .route("/", get(show_hall_list))
        .route("/:hall_id", get(show_hall))
        .route("/:hall_id/availability", get(check_availability));

    let admin_routers = Router::new()
        .route("/", post(register_hall))
        .route("/:hall_id", put(update_hall));

    Router::new()
        .nest("/halls", halls_routers)
        .nest("/admin/halls", admin_routers)
}
