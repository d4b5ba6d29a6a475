use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::update::{Update, UpdateChanges, UpdateFilter, UpdateInsert},
    errors::AppError,
    repositories::sqlx_repo::{conflict_on_unique_violation, SqlxUpdateRepo},
};

pub(crate) const UPDATE_SLUG_CONFLICT: &str = "A post with this slug already exists";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpdateRepository: Send + Sync {
    /// Newest first, drafts included unless filtered out.
    async fn list_updates(&self, filter: UpdateFilter) -> Result<Vec<Update>, AppError>;
    async fn get_update_by_slug(&self, slug: &str) -> Result<Update, AppError>;
    async fn get_update_by_id(&self, id: &Uuid) -> Result<Update, AppError>;
    async fn create_update(&self, update: &UpdateInsert) -> Result<Update, AppError>;
    /// Applies `changes` in one step. When the stored post moves from draft to
    /// published and has never been stamped, `published_at` becomes `now`.
    async fn edit_update(
        &self,
        id: &Uuid,
        changes: &UpdateChanges,
        now: DateTime<Utc>,
    ) -> Result<Update, AppError>;
    async fn delete_update(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxUpdateRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxUpdateRepo { pool }
    }
}

#[async_trait]
impl UpdateRepository for SqlxUpdateRepo {
    async fn list_updates(&self, filter: UpdateFilter) -> Result<Vec<Update>, AppError> {
        let mut builder = QueryBuilder::new(
            "SELECT id, title, slug, content_markdown, tags, published, published_at, created_at \
             FROM updates",
        );
        if let Some(published) = filter.published {
            builder.push(" WHERE published = ").push_bind(published);
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let updates = builder
            .build_query_as::<Update>()
            .fetch_all(&self.pool)
            .await?;

        Ok(updates)
    }

    async fn get_update_by_slug(&self, slug: &str) -> Result<Update, AppError> {
        sqlx::query_as::<_, Update>(
            r#"
            SELECT id, title, slug, content_markdown, tags, published, published_at, created_at
            FROM updates
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn get_update_by_id(&self, id: &Uuid) -> Result<Update, AppError> {
        sqlx::query_as::<_, Update>(
            r#"
            SELECT id, title, slug, content_markdown, tags, published, published_at, created_at
            FROM updates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn create_update(&self, update: &UpdateInsert) -> Result<Update, AppError> {
        sqlx::query_as::<_, Update>(
            r#"
            INSERT INTO updates (
                id, title, slug, content_markdown, tags, published, published_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, slug, content_markdown, tags, published, published_at, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&update.title)
        .bind(&update.slug)
        .bind(&update.content_markdown)
        .bind(&update.tags)
        .bind(update.published)
        .bind(update.published_at)
        .bind(update.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique_violation(e, UPDATE_SLUG_CONFLICT))
    }

    async fn edit_update(
        &self,
        id: &Uuid,
        changes: &UpdateChanges,
        now: DateTime<Utc>,
    ) -> Result<Update, AppError> {
        // Right-hand sides see the row as it was before this statement, so the
        // stamp is decided from the stored flag in the same atomic write.
        sqlx::query_as::<_, Update>(
            r#"
            UPDATE updates SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content_markdown = COALESCE($4, content_markdown),
                tags = COALESCE($5, tags),
                published = COALESCE($6, published),
                published_at = CASE
                    WHEN $6 IS TRUE AND published = FALSE AND published_at IS NULL THEN $7
                    ELSE published_at
                END
            WHERE id = $1
            RETURNING id, title, slug, content_markdown, tags, published, published_at, created_at
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.slug)
        .bind(&changes.content_markdown)
        .bind(&changes.tags)
        .bind(changes.published)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique_violation(e, UPDATE_SLUG_CONFLICT))?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn delete_update(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM updates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".into()));
        }
        Ok(())
    }
}
