use crate::database::{model::contact::ContactRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    contact::{
        event::{CreateContact, UpdateContactStatus},
        Contact, ContactStatus,
    },
    id::ContactId,
};
use kernel::repository::contact::ContactRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ContactRepositoryImpl {
    db: ConnectionPool,
}

const CONTACT_COLUMNS: &str = r#"
    contact_id, contact_name, email, phone, subject, message, status,
    created_at, updated_at
"#;

#[async_trait]
impl ContactRepository for ContactRepositoryImpl {
    async fn create(&self, event: CreateContact) -> AppResult<Contact> {
        let sql = format!(
            r#"
                INSERT INTO contacts
                (contact_id, contact_name, email, phone, subject, message, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {CONTACT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ContactRow>(&sql)
            .bind(ContactId::new())
            .bind(event.name)
            .bind(event.email)
            .bind(event.phone)
            .bind(event.subject)
            .bind(event.message)
            .bind(ContactStatus::Unread.to_string())
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .try_into()
    }

    async fn update_status(&self, event: UpdateContactStatus) -> AppResult<Contact> {
        let sql = format!(
            r#"
                UPDATE contacts SET status = $2
                WHERE contact_id = $1
                RETURNING {CONTACT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ContactRow>(&sql)
            .bind(event.contact_id)
            .bind(event.status.to_string())
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("Contact {} not found", event.contact_id))
            })?
            .try_into()
    }

    async fn find_all(&self) -> AppResult<Vec<Contact>> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY created_at DESC");
        sqlx::query_as::<_, ContactRow>(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Contact::try_from)
            .collect()
    }

    async fn find_by_id(&self, contact_id: ContactId) -> AppResult<Option<Contact>> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = $1");
        sqlx::query_as::<_, ContactRow>(&sql)
            .bind(contact_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Contact::try_from)
            .transpose()
    }
}
