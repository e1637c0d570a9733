use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    contact::{event::CreateContact, Contact, ContactStatus},
    id::ContactId,
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(skip)]
    pub phone: Option<String>,
    #[garde(length(min = 1))]
    pub subject: String,
    #[garde(length(min = 1))]
    pub message: String,
}

impl From<CreateContactRequest> for CreateContact {
    fn from(value: CreateContactRequest) -> Self {
        let CreateContactRequest {
            name,
            email,
            phone,
            subject,
            message,
        } = value;
        CreateContact::new(
            name,
            email,
            phone.filter(|p| !p.trim().is_empty()),
            subject,
            message,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactStatusRequest {
    #[garde(length(min = 1))]
    pub status: String,
}

impl UpdateContactStatusRequest {
    pub fn status(&self) -> Result<ContactStatus, AppError> {
        ContactStatus::parse(self.status.trim())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        let Contact {
            contact_id,
            name,
            email,
            phone,
            subject,
            message,
            status,
            created_at,
            updated_at,
        } = value;
        Self {
            id: contact_id,
            name,
            email,
            phone,
            subject,
            message,
            status,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactsResponse {
    pub items: Vec<ContactResponse>,
}

impl From<Vec<Contact>> for ContactsResponse {
    fn from(value: Vec<Contact>) -> Self {
        Self {
            items: value.into_iter().map(ContactResponse::from).collect(),
        }
    }
}
