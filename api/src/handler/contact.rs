use crate::{
    extractor::{StaffUser, ValidatedJson},
    handler::path_id,
    model::contact::{
        ContactResponse, ContactsResponse, CreateContactRequest, UpdateContactStatusRequest,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kernel::model::{contact::event::UpdateContactStatus, id::ContactId};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn register_contact(
    State(registry): State<AppRegistry>,
    ValidatedJson(req): ValidatedJson<CreateContactRequest>,
) -> AppResult<(StatusCode, Json<ContactResponse>)> {
    registry
        .contact_service()
        .create(req.into())
        .await
        .map(|contact| (StatusCode::CREATED, Json(contact.into())))
}

pub async fn show_contact_list(
    _user: StaffUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ContactsResponse>> {
    registry
        .contact_service()
        .find_all()
        .await
        .map(ContactsResponse::from)
        .map(Json)
}

pub async fn show_contact(
    _user: StaffUser,
    Path(contact_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ContactResponse>> {
    let contact_id: ContactId = path_id(&contact_id, "Contact")?;
    registry
        .contact_service()
        .find_by_id(contact_id)
        .await
        .map(ContactResponse::from)
        .map(Json)
}

pub async fn update_contact_status(
    _user: StaffUser,
    Path(contact_id): Path<String>,
    State(registry): State<AppRegistry>,
    ValidatedJson(req): ValidatedJson<UpdateContactStatusRequest>,
) -> AppResult<Json<ContactResponse>> {
    let contact_id: ContactId = path_id(&contact_id, "Contact")?;
    let status = req.status()?;

    registry
        .contact_service()
        .update_status(UpdateContactStatus::new(contact_id, status))
        .await
        .map(ContactResponse::from)
        .map(Json)
}
