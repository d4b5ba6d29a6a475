use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web,
};

use crate::errors::AppError;

/// Body and query-string failures use the same 400 shape as field validation.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        let message = match &err {
            JsonPayloadError::ContentType => "Expected a JSON body".to_string(),
            JsonPayloadError::Deserialize(e) => format!("Invalid JSON body: {}", e),
            other => format!("Invalid JSON payload: {}", other),
        };
        AppError::invalid_field("body", message)
    }
}

impl From<QueryPayloadError> for AppError {
    fn from(err: QueryPayloadError) -> Self {
        AppError::invalid_field("query", format!("Invalid query string: {}", err))
    }
}
