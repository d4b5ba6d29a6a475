use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Dashboard credential. Only ever created by seeding.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AdminUserInsert {
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl AdminUserInsert {
    pub fn new(email: &str, password_hash: String) -> Self {
        AdminUserInsert {
            email: email.trim().to_lowercase(),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}
