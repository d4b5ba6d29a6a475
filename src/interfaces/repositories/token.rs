use jsonwebtoken::TokenData;

use crate::{entities::{admin_user::AdminUser, token::Claims}, errors::AuthError};

pub trait TokenServiceRepository: Send + Sync {
    /// Creates a signed access token for the admin
    fn create_jwt(&self, admin: &AdminUser) -> Result<String, AuthError>;

    /// Decodes a JWT and returns the claims
    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;

    /// Lifetime of freshly issued tokens
    fn expires_in_seconds(&self) -> i64;
}
