pub mod booking;
pub mod contact;
pub mod hall;
pub mod health;

use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(hall::build_hall_routers())
        .merge(booking::build_booking_routers())
        .merge(contact::build_contact_routers());
    Router::new()
        .merge(health::build_health_check_routers())
        .nest("/api", router)
}
