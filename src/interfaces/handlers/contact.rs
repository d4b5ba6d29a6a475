use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;
use validator::Validate;

use crate::{
    entities::contact_message::{ContactStatusRequest, NewContactMessageRequest},
    errors::AppError,
    limiter::rate_limiter::RateLimitDecision,
    use_cases::extractors::AdminClaims,
    utils::client_ip::client_ip,
    AppState,
};

#[instrument(skip(req, state, data))]
pub async fn submit_message(
    req: HttpRequest,
    state: web::Data<AppState>,
    data: web::Json<NewContactMessageRequest>,
) -> Result<impl Responder, AppError> {
    let request = data.into_inner();
    request.validate()?;

    // Only well-formed submissions spend a token.
    let client = client_ip(&req, state.trust_x_forwarded_for);
    if let RateLimitDecision::Limited { retry_after_secs } = state.contact_limiter.check(&client) {
        tracing::warn!(client = %client, "Contact form rate limit exceeded");
        return Err(AppError::RateLimited { retry_after_secs });
    }

    let message = state.contact_handler.submit_message(request).await?;
    Ok(HttpResponse::Created().json(message))
}

#[instrument(skip(_claims, state))]
pub async fn list_messages(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let messages = state.contact_handler.list_messages().await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[instrument(skip(_claims, state, data))]
pub async fn set_message_status(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ContactStatusRequest>,
) -> Result<impl Responder, AppError> {
    let message = state
        .contact_handler
        .set_status(&message_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(message))
}
