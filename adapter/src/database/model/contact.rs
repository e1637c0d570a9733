use kernel::model::{
    contact::{Contact, ContactStatus},
    id::ContactId,
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct ContactRow {
    pub contact_id: ContactId,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = AppError;

    fn try_from(value: ContactRow) -> Result<Self, Self::Error> {
        let ContactRow {
            contact_id,
            contact_name,
            email,
            phone,
            subject,
            message,
            status,
            created_at,
            updated_at,
        } = value;
        let status = status.parse::<ContactStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "contact {contact_id} has an unknown status: {status}"
            ))
        })?;
        Ok(Contact {
            contact_id,
            name: contact_name,
            email,
            phone,
            subject,
            message,
            status,
            created_at,
            updated_at,
        })
    }
}
