use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::admin_user::{AdminUser, AdminUserInsert},
    errors::AppError,
    repositories::sqlx_repo::{conflict_on_unique_violation, SqlxAdminUserRepo},
};

pub(crate) const ADMIN_EMAIL_CONFLICT: &str = "An admin with this email already exists";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError>;
    async fn get_admin_by_id(&self, id: &Uuid) -> Result<Option<AdminUser>, AppError>;
    async fn create_admin(&self, admin: &AdminUserInsert) -> Result<AdminUser, AppError>;
}

impl SqlxAdminUserRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxAdminUserRepo { pool }
    }
}

#[async_trait]
impl AdminUserRepository for SqlxAdminUserRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError> {
        let admin = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, password_hash, created_at FROM admin_users WHERE email = $1",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    async fn get_admin_by_id(&self, id: &Uuid) -> Result<Option<AdminUser>, AppError> {
        sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, password_hash, created_at FROM admin_users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn create_admin(&self, admin: &AdminUserInsert) -> Result<AdminUser, AppError> {
        sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(admin.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique_violation(e, ADMIN_EMAIL_CONFLICT))
    }
}
