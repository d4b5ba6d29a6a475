use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::contact_message::{ContactMessage, ContactMessageInsert, ContactStatus},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact_message(&self, message: &ContactMessageInsert) -> Result<ContactMessage, AppError>;
    /// Newest first.
    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError>;
    async fn set_contact_status(&self, id: &Uuid, status: ContactStatus) -> Result<ContactMessage, AppError>;
}

impl SqlxContactRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_contact_message(&self, message: &ContactMessageInsert) -> Result<ContactMessage, AppError> {
        let created = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (id, name, email, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, message, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(message.status)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, message, status, created_at
            FROM contact_messages
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn set_contact_status(&self, id: &Uuid, status: ContactStatus) -> Result<ContactMessage, AppError> {
        sqlx::query_as::<_, ContactMessage>(
            r#"
            UPDATE contact_messages SET status = $2
            WHERE id = $1
            RETURNING id, name, email, message, status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact message not found".into()))
    }
}
