use std::sync::Arc;

use validator::Validate;

use crate::{
    domain::slug::slug_for_title,
    entities::project::{EditProjectRequest, NewProjectRequest, Project, ProjectFilter},
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository + ?Sized,
{
    pub project_repo: Arc<R>,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository + ?Sized,
{
    pub fn new(project_repo: Arc<R>) -> Self {
        ProjectHandler { project_repo }
    }

    pub async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects(filter).await
    }

    pub async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        self.project_repo.get_project_by_slug(slug).await
    }

    /// Creates a project under the slug of its title. A taken slug is a
    /// `Conflict`; nothing is suffixed.
    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        request.validate()?;

        let slug = slug_for_title(&request.title)?;
        let insert = request.prepare_for_insert(slug);

        let project = self.project_repo.create_project(&insert).await?;
        tracing::info!(project_id = %project.id, slug = %project.slug, "Project created");
        Ok(project)
    }

    /// Applies a partial edit. The slug follows the title when it changes.
    pub async fn update_project(&self, id: &str, request: EditProjectRequest) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        request.validate()?;

        let current = self.project_repo.get_project_by_id(&valid_id).await?;

        let slug = match request.title.value_ref() {
            Some(title) if *title != current.title => {
                Some(slug_for_title(title)?).filter(|slug| *slug != current.slug)
            }
            _ => None,
        };

        let changes = request.into_changes(slug);
        self.project_repo.update_project(&valid_id, &changes).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.delete_project(&valid_id).await?;
        tracing::info!(project_id = %valid_id, "Project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::option_fields::OptionField;
    use crate::repositories::project::MockProjectRepository;
    use chrono::Utc;
    use mockall::predicate::*;
    use uuid::Uuid;

    fn stored(title: &str, slug: &str) -> Project {
        Project {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: slug.into(),
            description: "desc".into(),
            stack: vec![],
            images: vec![],
            github_url: None,
            live_url: None,
            featured: false,
            created_at: Utc::now(),
        }
    }

    fn new_request(title: &str) -> NewProjectRequest {
        NewProjectRequest {
            title: title.into(),
            description: "A thing I built".into(),
            stack: vec!["rust".into()],
            images: vec![],
            github_url: None,
            live_url: None,
            featured: false,
        }
    }

    #[actix_rt::test]
    async fn create_derives_slug_from_title() {
        let mut repo = MockProjectRepository::new();
        repo.expect_create_project()
            .withf(|insert| insert.slug == "my-awesome-project")
            .times(1)
            .returning(|insert| {
                let mut project = stored(&insert.title, &insert.slug);
                project.stack = insert.stack.clone();
                Ok(project)
            });

        let handler = ProjectHandler::new(Arc::new(repo));
        let project = handler.create_project(new_request("My Awesome Project!")).await.unwrap();
        assert_eq!(project.slug, "my-awesome-project");
    }

    #[actix_rt::test]
    async fn slug_collision_surfaces_as_conflict() {
        let mut repo = MockProjectRepository::new();
        repo.expect_create_project()
            .returning(|_| Err(AppError::Conflict("A project with this slug already exists".into())));

        let handler = ProjectHandler::new(Arc::new(repo));
        let err = handler.create_project(new_request("foo   bar!")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[actix_rt::test]
    async fn punctuation_only_title_is_rejected_before_storage() {
        let mut repo = MockProjectRepository::new();
        repo.expect_create_project().never();

        let handler = ProjectHandler::new(Arc::new(repo));
        let err = handler.create_project(new_request("!!!")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_rt::test]
    async fn rename_rederives_slug() {
        let current = stored("Old Name", "old-name");
        let id = current.id;

        let mut repo = MockProjectRepository::new();
        repo.expect_get_project_by_id()
            .with(eq(id))
            .returning(move |_| Ok(current.clone()));
        repo.expect_update_project()
            .withf(|_, changes| changes.slug.as_deref() == Some("new-name"))
            .times(1)
            .returning(|_, changes| Ok(stored("New Name", changes.slug.as_deref().unwrap_or_default())));

        let handler = ProjectHandler::new(Arc::new(repo));
        let request = EditProjectRequest {
            title: OptionField::SetToValue("New Name".into()),
            ..Default::default()
        };
        let project = handler.update_project(&id.to_string(), request).await.unwrap();
        assert_eq!(project.slug, "new-name");
    }

    #[actix_rt::test]
    async fn edit_without_title_keeps_slug() {
        let current = stored("Same", "same");
        let id = current.id;

        let mut repo = MockProjectRepository::new();
        repo.expect_get_project_by_id()
            .returning(move |_| Ok(current.clone()));
        repo.expect_update_project()
            .withf(|_, changes| changes.slug.is_none() && changes.featured == Some(true))
            .times(1)
            .returning(|_, _| Ok(stored("Same", "same")));

        let handler = ProjectHandler::new(Arc::new(repo));
        let request = EditProjectRequest {
            featured: OptionField::SetToValue(true),
            ..Default::default()
        };
        handler.update_project(&id.to_string(), request).await.unwrap();
    }

    #[actix_rt::test]
    async fn unknown_id_is_not_found() {
        let mut repo = MockProjectRepository::new();
        repo.expect_get_project_by_id()
            .returning(|_| Err(AppError::NotFound("Project not found".into())));
        repo.expect_update_project().never();

        let handler = ProjectHandler::new(Arc::new(repo));
        let err = handler
            .update_project(&Uuid::new_v4().to_string(), EditProjectRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_rt::test]
    async fn malformed_id_is_a_validation_error() {
        let handler = ProjectHandler::new(Arc::new(MockProjectRepository::new()));
        let err = handler.delete_project("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(ref details) if details[0].field == "id"));
    }
}
