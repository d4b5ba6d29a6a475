use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    domain::{publish::published_at_on_create, slug::slug_for_title},
    entities::update::{EditUpdateRequest, NewUpdateRequest, Update, UpdateDetailResponse, UpdateFilter},
    errors::AppError,
    repositories::update::UpdateRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct UpdateHandler<R>
where
    R: UpdateRepository + ?Sized,
{
    pub update_repo: Arc<R>,
}

impl<R> UpdateHandler<R>
where
    R: UpdateRepository + ?Sized,
{
    pub fn new(update_repo: Arc<R>) -> Self {
        UpdateHandler { update_repo }
    }

    pub async fn list_updates(&self, filter: UpdateFilter) -> Result<Vec<Update>, AppError> {
        self.update_repo.list_updates(filter).await
    }

    /// Post by slug, with its markdown rendered to sanitised HTML.
    pub async fn get_update_by_slug(&self, slug: &str) -> Result<UpdateDetailResponse, AppError> {
        let update = self.update_repo.get_update_by_slug(slug).await?;
        Ok(update.to_detail_response())
    }

    pub async fn create_update(&self, request: NewUpdateRequest) -> Result<Update, AppError> {
        request.validate()?;

        let slug = slug_for_title(&request.title)?;
        let now = Utc::now();
        let published_at = published_at_on_create(request.published, now);
        let insert = request.prepare_for_insert(slug, published_at, now);

        let update = self.update_repo.create_update(&insert).await?;
        tracing::info!(update_id = %update.id, published = update.published, "Post created");
        Ok(update)
    }

    /// Partial edit. The stored post is read first so a rename can re-derive
    /// the slug; the publish stamp itself is settled by the repository
    /// against the stored flag.
    pub async fn update_update(&self, id: &str, request: EditUpdateRequest) -> Result<Update, AppError> {
        let valid_id = valid_uuid(id)?;
        request.validate()?;

        let current = self.update_repo.get_update_by_id(&valid_id).await?;

        let slug = match request.title.value_ref() {
            Some(title) if *title != current.title => {
                Some(slug_for_title(title)?).filter(|slug| *slug != current.slug)
            }
            _ => None,
        };

        let changes = request.into_changes(slug);
        let updated = self
            .update_repo
            .edit_update(&valid_id, &changes, Utc::now())
            .await?;

        if current.published_at.is_none() && updated.published_at.is_some() {
            tracing::info!(update_id = %updated.id, "Post published for the first time");
        }
        Ok(updated)
    }

    pub async fn delete_update(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.update_repo.delete_update(&valid_id).await?;
        tracing::info!(update_id = %valid_id, "Post deleted");
        Ok(())
    }
}
