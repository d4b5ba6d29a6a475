use std::sync::Arc;

use crate::auth::password::verify_password;
use crate::entities::admin_user::{AdminUser, LoginRequest};
use crate::entities::token::{AuthResponse, Claims};
use crate::errors::AuthError;
use crate::repositories::admin_user::AdminUserRepository;
use crate::repositories::token::TokenServiceRepository;

pub struct AuthHandler<R, T>
where
    R: AdminUserRepository + ?Sized,
    T: TokenServiceRepository,
{
    pub admin_repo: Arc<R>,
    pub token_service: T,
}

impl<R, T> AuthHandler<R, T>
where
    R: AdminUserRepository + ?Sized,
    T: TokenServiceRepository,
{
    pub fn new(admin_repo: Arc<R>, token_service: T) -> Self {
        AuthHandler {
            admin_repo,
            token_service,
        }
    }

    /// Exchanges admin credentials for a bearer token.
    ///
    /// Unknown emails and wrong passwords fail the same way.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let admin = self
            .admin_repo
            .get_admin_by_email(&request.email)
            .await
            .map_err(|e| {
                tracing::error!("Admin lookup failed during login: {}", e);
                AuthError::WrongCredentials
            })?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &admin.password_hash)
            .map_err(|e| {
                tracing::warn!("Stored password hash could not be verified: {}", e);
                AuthError::WrongCredentials
            })?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&admin)?;

        tracing::info!(admin_id = %admin.id, "Admin logged in");
        Ok(response)
    }

    pub fn create_auth_response(&self, admin: &AdminUser) -> Result<AuthResponse, AuthError> {
        let token = self.token_service.create_jwt(admin)?;
        Ok(AuthResponse::new(token, self.token_service.expires_in_seconds()))
    }

    /// Verifies a bearer token for the Auth Gate.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.token_service.decode_jwt(token)?.claims)
    }
}
