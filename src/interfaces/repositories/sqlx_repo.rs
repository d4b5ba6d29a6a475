use std::borrow::Cow;

use sqlx::PgPool;

use crate::errors::AppError;

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxUpdateRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxBotInfoRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxContactRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxAdminUserRepo {
    pub pool: PgPool,
}

/// Maps a unique-index violation to `Conflict` with a caller-facing message.
pub(crate) fn conflict_on_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match err {
        sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::from(err),
    }
}
