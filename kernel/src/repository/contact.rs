use crate::model::{
    contact::{
        event::{CreateContact, UpdateContactStatus},
        Contact,
    },
    id::ContactId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, event: CreateContact) -> AppResult<Contact>;
    async fn update_status(&self, event: UpdateContactStatus) -> AppResult<Contact>;
    async fn find_all(&self) -> AppResult<Vec<Contact>>;
    async fn find_by_id(&self, contact_id: ContactId) -> AppResult<Option<Contact>>;
}
