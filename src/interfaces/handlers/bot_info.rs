use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::bot_info::BotInfoRequest, errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[instrument(skip(state))]
pub async fn get_bot_info(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let info = state.bot_info_handler.get_bot_info().await?;
    Ok(HttpResponse::Ok().json(info))
}

#[instrument(skip(_claims, state, data))]
pub async fn upsert_bot_info(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<BotInfoRequest>,
) -> Result<impl Responder, AppError> {
    let info = state.bot_info_handler.upsert_bot_info(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(info))
}
