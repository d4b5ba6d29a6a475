use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};

use crate::entities::admin_user::AdminUser;
use crate::entities::token::Claims;
use crate::errors::AuthError;
use crate::repositories::token::TokenServiceRepository;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            access_expiration: Duration::minutes(config.jwt_expiration_minutes),
        }
    }

    pub fn create_jwt(&self, admin: &AdminUser) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.access_expiration).timestamp() as usize;

        let claims = Claims {
            sub: admin.id.to_string(),
            email: admin.email.clone(),
            iat: now.timestamp() as usize,
            exp,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding).map_err(|e| {
            tracing::error!("Failed to sign JWT: {}", e);
            AuthError::TokenCreation
        })
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}

impl TokenServiceRepository for JwtService {
    fn create_jwt(&self, admin: &AdminUser) -> Result<String, AuthError> {
        self.create_jwt(admin)
    }

    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        self.decode_jwt(token)
    }

    fn expires_in_seconds(&self) -> i64 {
        self.access_expiration.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AppEnvironment, StorageBackend};
    use uuid::Uuid;

    fn config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            storage: StorageBackend::Memory,
            database_url: String::new(),
            database_max_connections: 1,
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "unit_test_jwt_secret_with_enough_length_for_hs512".into(),
            jwt_expiration_minutes: 15,
            contact_rate_limit_per_hour: 5,
            trust_x_forwarded_for: false,
            seed_on_startup: false,
            admin_email: "admin@example.com".into(),
            admin_password: None,
        }
    }

    fn admin() -> AdminUser {
        AdminUser {
            id: Uuid::new_v4(),
            email: "admin@example.com".into(),
            password_hash: "unused".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let service = JwtService::new(&config());
        let admin = admin();
        let token = service.create_jwt(&admin).unwrap();

        let claims = service.decode_jwt(&token).unwrap().claims;
        assert_eq!(claims.sub, admin.id.to_string());
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(service.expires_in_seconds(), 15 * 60);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = JwtService::new(&config()).create_jwt(&admin()).unwrap();

        let mut other = config();
        other.jwt_secret = "another_secret_that_is_also_long_enough_for_hs512".into();
        let result = JwtService::new(&other).decode_jwt(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config();
        let keys = JwtKeys::from(&config);
        let issued = Utc::now() - Duration::hours(3);
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "admin@example.com".into(),
            iat: issued.timestamp() as usize,
            exp: (issued + Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(&Header::new(JWT_ALGORITHM), &claims, &keys.encoding).unwrap();

        let result = JwtService::new(&config).decode_jwt(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let result = JwtService::new(&config()).decode_jwt("not.a.token");
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
