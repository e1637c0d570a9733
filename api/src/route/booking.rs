use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    register_booking, show_booking, show_booking_list, update_booking_status,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/", get(show_booking_list).post(register_booking))
        .route("/:booking_id", get(show_booking))
        .route("/:booking_id/status", put(update_booking_status));

    Router::new().nest("/bookings", bookings_routers)
}
