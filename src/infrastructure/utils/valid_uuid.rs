use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path id, rejecting malformed values as a validation error on `id`.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::invalid_field("id", "Invalid UUID format"))
}
