use crate::{
    model::{
        contact::{
            event::{CreateContact, UpdateContactStatus},
            Contact,
        },
        id::ContactId,
    },
    notification::{Notification, NotificationDispatcher},
    repository::contact::ContactRepository,
};
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(Clone, new)]
pub struct ContactService {
    contacts: Arc<dyn ContactRepository>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl ContactService {
    pub async fn create(&self, event: CreateContact) -> AppResult<Contact> {
        event.validate()?;

        let contact = self.contacts.create(event).await?;
        tracing::info!(contact_id = %contact.contact_id, "contact submission stored");

        self.notifier
            .dispatch(Notification::ContactAcknowledgement(contact.clone()));
        Ok(contact)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Contact>> {
        self.contacts.find_all().await
    }

    pub async fn find_by_id(&self, contact_id: ContactId) -> AppResult<Contact> {
        self.contacts
            .find_by_id(contact_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("Contact {contact_id} not found")))
    }

    pub async fn update_status(&self, event: UpdateContactStatus) -> AppResult<Contact> {
        self.contacts.update_status(event).await
    }
}
