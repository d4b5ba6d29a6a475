use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::update::{EditUpdateRequest, NewUpdateRequest, UpdateFilter},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

/// Drafts are listed too unless `?published=true` is given.
#[instrument(skip(state))]
pub async fn list_updates(
    state: web::Data<AppState>,
    filter: web::Query<UpdateFilter>,
) -> Result<impl Responder, AppError> {
    let updates = state.update_handler.list_updates(filter.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updates))
}

#[instrument(skip(state))]
pub async fn get_update(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let update = state.update_handler.get_update_by_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(update))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_update(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewUpdateRequest>,
) -> Result<impl Responder, AppError> {
    let update = state.update_handler.create_update(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(update))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_update(
    _claims: AdminClaims,
    update_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<EditUpdateRequest>,
) -> Result<impl Responder, AppError> {
    let update = state
        .update_handler
        .update_update(&update_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(update))
}

#[instrument(skip(_claims, state))]
pub async fn delete_update(
    _claims: AdminClaims,
    update_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.update_handler.delete_update(&update_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Post deleted"})))
}
