use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::validation::validate_not_blank;

/// Admin workflow state of a contact message. Any value may be set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "contact_status", rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ContactMessageInsert {
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

/// Matches the `contact_messages.name` column width.
pub const MAX_NAME_LENGTH: u64 = 100;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewContactMessageRequest {
    #[validate(
        length(max = MAX_NAME_LENGTH, message = "Name is too long"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 10, max = 5000, message = "Message must be between 10 and 5000 characters"))]
    pub message: String,
}

impl NewContactMessageRequest {
    pub fn prepare_for_insert(self) -> ContactMessageInsert {
        ContactMessageInsert {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            message: self.message,
            status: ContactStatus::New,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactStatusRequest {
    pub status: ContactStatus,
}
