use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::contact::{
    register_contact, show_contact, show_contact_list, update_contact_status,
};

pub fn build_contact_routers() -> Router<AppRegistry> {
    let contacts_routers = Router::new()
        .route("/", get(show_contact_list).post(register_contact))
        .route("/:contact_id", get(show_contact))
        .route("/:contact_id/status", put(update_contact_status));

    Router::new().nest("/contacts", contacts_routers)
}
