use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::contact_message::{ContactMessage, ContactStatusRequest, NewContactMessageRequest},
    errors::AppError,
    repositories::contact::ContactRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ContactHandler<R>
where
    R: ContactRepository + ?Sized,
{
    pub contact_repo: Arc<R>,
}

impl<R> ContactHandler<R>
where
    R: ContactRepository + ?Sized,
{
    pub fn new(contact_repo: Arc<R>) -> Self {
        ContactHandler { contact_repo }
    }

    /// Stores a public submission with status `new`.
    pub async fn submit_message(&self, request: NewContactMessageRequest) -> Result<ContactMessage, AppError> {
        request.validate()?;

        let insert = request.prepare_for_insert();
        let message = self.contact_repo.create_contact_message(&insert).await?;
        tracing::info!(message_id = %message.id, "Contact message received");
        Ok(message)
    }

    pub async fn list_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.contact_repo.list_contact_messages().await
    }

    pub async fn set_status(&self, id: &str, request: ContactStatusRequest) -> Result<ContactMessage, AppError> {
        let valid_id = valid_uuid(id)?;
        self.contact_repo.set_contact_status(&valid_id, request.status).await
    }
}
