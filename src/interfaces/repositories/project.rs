use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectChanges, ProjectFilter, ProjectInsert},
    errors::AppError,
    repositories::sqlx_repo::{conflict_on_unique_violation, SqlxProjectRepo},
};

pub(crate) const PROJECT_SLUG_CONFLICT: &str = "A project with this slug already exists";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Newest first.
    async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>, AppError>;
    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError>;
    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError>;
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn update_project(&self, id: &Uuid, changes: &ProjectChanges) -> Result<Project, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new(
            "SELECT id, title, slug, description, stack, images, github_url, live_url, featured, created_at \
             FROM projects",
        );
        if let Some(featured) = filter.featured {
            builder.push(" WHERE featured = ").push_bind(featured);
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let projects = builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, slug, description, stack, images, github_url, live_url, featured, created_at
            FROM projects
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, slug, description, stack, images, github_url, live_url, featured, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                id, title, slug, description, stack, images, github_url, live_url, featured, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, title, slug, description, stack, images, github_url, live_url, featured, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&project.title)
        .bind(&project.slug)
        .bind(&project.description)
        .bind(&project.stack)
        .bind(&project.images)
        .bind(&project.github_url)
        .bind(&project.live_url)
        .bind(project.featured)
        .bind(project.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique_violation(e, PROJECT_SLUG_CONFLICT))
    }

    async fn update_project(&self, id: &Uuid, changes: &ProjectChanges) -> Result<Project, AppError> {
        // A `true` flag in $7/$9 means the link is being replaced, possibly with NULL.
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                stack = COALESCE($5, stack),
                images = COALESCE($6, images),
                github_url = CASE WHEN $7 THEN $8 ELSE github_url END,
                live_url = CASE WHEN $9 THEN $10 ELSE live_url END,
                featured = COALESCE($11, featured)
            WHERE id = $1
            RETURNING id, title, slug, description, stack, images, github_url, live_url, featured, created_at
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.slug)
        .bind(&changes.description)
        .bind(&changes.stack)
        .bind(&changes.images)
        .bind(changes.github_url.is_some())
        .bind(changes.github_url.clone().flatten())
        .bind(changes.live_url.is_some())
        .bind(changes.live_url.clone().flatten())
        .bind(changes.featured)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique_violation(e, PROJECT_SLUG_CONFLICT))?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }
        Ok(())
    }
}
