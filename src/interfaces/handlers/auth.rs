use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use validator::Validate;

use crate::{entities::admin_user::LoginRequest, errors::AppError, AppState};

#[instrument(skip(state, body))]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, actix_web::Error> {
    let request = body.into_inner();
    request.validate().map_err(AppError::from)?;

    let auth_response = state.auth_handler.login(request).await?;
    Ok(HttpResponse::Ok().json(auth_response))
}
