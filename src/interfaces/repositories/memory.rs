//! Process-local storage backend.
//!
//! Every table sits behind one `RwLock`. Mutations check uniqueness and write
//! while holding the write guard, so slug and email collisions surface as
//! `Conflict` and the publish transition is decided against the stored row.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
    domain::publish::published_at_on_update,
    entities::{
        admin_user::{AdminUser, AdminUserInsert},
        bot_info::{BotInfo, BotInfoUpsert},
        contact_message::{ContactMessage, ContactMessageInsert, ContactStatus},
        project::{Project, ProjectChanges, ProjectFilter, ProjectInsert},
        update::{Update, UpdateChanges, UpdateFilter, UpdateInsert},
    },
    errors::AppError,
    repositories::{
        admin_user::{AdminUserRepository, ADMIN_EMAIL_CONFLICT},
        bot_info::BotInfoRepository,
        contact::ContactRepository,
        project::{ProjectRepository, PROJECT_SLUG_CONFLICT},
        update::{UpdateRepository, UPDATE_SLUG_CONFLICT},
    },
};

#[derive(Default)]
struct Tables {
    projects: HashMap<Uuid, Project>,
    updates: HashMap<Uuid, Update>,
    bot_info: Option<BotInfo>,
    contact_messages: HashMap<Uuid, ContactMessage>,
    admin_users: HashMap<Uuid, AdminUser>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(mut rows: Vec<T>, key: impl Fn(&T) -> (DateTime<Utc>, Uuid)) -> Vec<T> {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>, AppError> {
        let tables = self.tables.read();
        let rows = tables
            .projects
            .values()
            .filter(|p| filter.featured.is_none_or(|featured| p.featured == featured))
            .cloned()
            .collect();
        Ok(newest_first(rows, |p: &Project| (p.created_at, p.id)))
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        self.tables
            .read()
            .projects
            .values()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        self.tables
            .read()
            .projects
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let mut tables = self.tables.write();
        if tables.projects.values().any(|p| p.slug == project.slug) {
            return Err(AppError::Conflict(PROJECT_SLUG_CONFLICT.into()));
        }

        let created = Project {
            id: Uuid::new_v4(),
            title: project.title.clone(),
            slug: project.slug.clone(),
            description: project.description.clone(),
            stack: project.stack.clone(),
            images: project.images.clone(),
            github_url: project.github_url.clone(),
            live_url: project.live_url.clone(),
            featured: project.featured,
            created_at: project.created_at,
        };
        tables.projects.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_project(&self, id: &Uuid, changes: &ProjectChanges) -> Result<Project, AppError> {
        let mut tables = self.tables.write();
        if let Some(slug) = &changes.slug {
            if tables.projects.values().any(|p| &p.slug == slug && &p.id != id) {
                return Err(AppError::Conflict(PROJECT_SLUG_CONFLICT.into()));
            }
        }

        let project = tables
            .projects
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
        changes.apply_to(project);
        Ok(project.clone())
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        self.tables
            .write()
            .projects
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }
}

#[async_trait]
impl UpdateRepository for MemoryStore {
    async fn list_updates(&self, filter: UpdateFilter) -> Result<Vec<Update>, AppError> {
        let tables = self.tables.read();
        let rows = tables
            .updates
            .values()
            .filter(|u| filter.published.is_none_or(|published| u.published == published))
            .cloned()
            .collect();
        Ok(newest_first(rows, |u: &Update| (u.created_at, u.id)))
    }

    async fn get_update_by_slug(&self, slug: &str) -> Result<Update, AppError> {
        self.tables
            .read()
            .updates
            .values()
            .find(|u| u.slug == slug)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn get_update_by_id(&self, id: &Uuid) -> Result<Update, AppError> {
        self.tables
            .read()
            .updates
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn create_update(&self, update: &UpdateInsert) -> Result<Update, AppError> {
        let mut tables = self.tables.write();
        if tables.updates.values().any(|u| u.slug == update.slug) {
            return Err(AppError::Conflict(UPDATE_SLUG_CONFLICT.into()));
        }

        let created = Update {
            id: Uuid::new_v4(),
            title: update.title.clone(),
            slug: update.slug.clone(),
            content_markdown: update.content_markdown.clone(),
            tags: update.tags.clone(),
            published: update.published,
            published_at: update.published_at,
            created_at: update.created_at,
        };
        tables.updates.insert(created.id, created.clone());
        Ok(created)
    }

    async fn edit_update(
        &self,
        id: &Uuid,
        changes: &UpdateChanges,
        now: DateTime<Utc>,
    ) -> Result<Update, AppError> {
        let mut tables = self.tables.write();
        if let Some(slug) = &changes.slug {
            if tables.updates.values().any(|u| &u.slug == slug && &u.id != id) {
                return Err(AppError::Conflict(UPDATE_SLUG_CONFLICT.into()));
            }
        }

        let update = tables
            .updates
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Post not found".into()))?;

        update.published_at =
            published_at_on_update(update.publish_state(), changes.published, update.published_at, now);
        if let Some(title) = &changes.title {
            update.title = title.clone();
        }
        if let Some(slug) = &changes.slug {
            update.slug = slug.clone();
        }
        if let Some(content) = &changes.content_markdown {
            update.content_markdown = content.clone();
        }
        if let Some(tags) = &changes.tags {
            update.tags = tags.clone();
        }
        if let Some(published) = changes.published {
            update.published = published;
        }
        Ok(update.clone())
    }

    async fn delete_update(&self, id: &Uuid) -> Result<(), AppError> {
        self.tables
            .write()
            .updates
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }
}

#[async_trait]
impl BotInfoRepository for MemoryStore {
    async fn get_bot_info(&self) -> Result<BotInfo, AppError> {
        self.tables
            .read()
            .bot_info
            .clone()
            .ok_or_else(|| AppError::NotFound("Bot info not found".into()))
    }

    async fn upsert_bot_info(&self, bot: &BotInfoUpsert) -> Result<BotInfo, AppError> {
        let mut tables = self.tables.write();
        if let Some(existing) = tables.bot_info.as_mut() {
            bot.clone().apply_to(existing);
            return Ok(existing.clone());
        }

        let created = bot.clone().into_new_record(Uuid::new_v4());
        tables.bot_info = Some(created.clone());
        Ok(created)
    }

    async fn insert_bot_info_if_absent(&self, bot: &BotInfoUpsert) -> Result<bool, AppError> {
        let mut tables = self.tables.write();
        if tables.bot_info.is_some() {
            return Ok(false);
        }
        tables.bot_info = Some(bot.clone().into_new_record(Uuid::new_v4()));
        Ok(true)
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn create_contact_message(&self, message: &ContactMessageInsert) -> Result<ContactMessage, AppError> {
        let created = ContactMessage {
            id: Uuid::new_v4(),
            name: message.name.clone(),
            email: message.email.clone(),
            message: message.message.clone(),
            status: message.status,
            created_at: message.created_at,
        };
        self.tables
            .write()
            .contact_messages
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        let rows = self.tables.read().contact_messages.values().cloned().collect();
        Ok(newest_first(rows, |m: &ContactMessage| (m.created_at, m.id)))
    }

    async fn set_contact_status(&self, id: &Uuid, status: ContactStatus) -> Result<ContactMessage, AppError> {
        let mut tables = self.tables.write();
        let message = tables
            .contact_messages
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Contact message not found".into()))?;
        message.status = status;
        Ok(message.clone())
    }
}

#[async_trait]
impl AdminUserRepository for MemoryStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .tables
            .read()
            .admin_users
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn get_admin_by_id(&self, id: &Uuid) -> Result<Option<AdminUser>, AppError> {
        Ok(self.tables.read().admin_users.get(id).cloned())
    }

    async fn create_admin(&self, admin: &AdminUserInsert) -> Result<AdminUser, AppError> {
        let mut tables = self.tables.write();
        if tables.admin_users.values().any(|a| a.email == admin.email) {
            return Err(AppError::Conflict(ADMIN_EMAIL_CONFLICT.into()));
        }

        let created = AdminUser {
            id: Uuid::new_v4(),
            email: admin.email.clone(),
            password_hash: admin.password_hash.clone(),
            created_at: admin.created_at,
        };
        tables.admin_users.insert(created.id, created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn project(slug: &str, created_at: DateTime<Utc>, featured: bool) -> ProjectInsert {
        ProjectInsert {
            title: slug.to_string(),
            slug: slug.to_string(),
            description: "desc".into(),
            stack: vec!["rust".into(), "rust".into()],
            images: vec![],
            github_url: None,
            live_url: None,
            featured,
            created_at,
        }
    }

    fn draft(slug: &str) -> UpdateInsert {
        UpdateInsert {
            title: slug.to_string(),
            slug: slug.to_string(),
            content_markdown: "body".into(),
            tags: vec![],
            published: false,
            published_at: None,
            created_at: Utc::now(),
        }
    }

    fn publish(flag: bool) -> UpdateChanges {
        UpdateChanges {
            published: Some(flag),
            ..Default::default()
        }
    }

    #[actix_rt::test]
    async fn projects_list_newest_first_and_filter() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.create_project(&project("old", now - Duration::days(2), true)).await.unwrap();
        store.create_project(&project("new", now, false)).await.unwrap();

        let all = store.list_projects(ProjectFilter::default()).await.unwrap();
        let slugs: Vec<_> = all.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old"]);
        assert_eq!(all[0].stack, vec!["rust", "rust"]);

        let featured = store
            .list_projects(ProjectFilter { featured: Some(true) })
            .await
            .unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].slug, "old");
    }

    #[actix_rt::test]
    async fn duplicate_slug_conflicts_on_create_and_rename() {
        let store = MemoryStore::new();
        store.create_project(&project("foo-bar", Utc::now(), false)).await.unwrap();
        let other = store.create_project(&project("other", Utc::now(), false)).await.unwrap();

        let err = store.create_project(&project("foo-bar", Utc::now(), false)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let rename = ProjectChanges {
            slug: Some("foo-bar".into()),
            ..Default::default()
        };
        let err = store.update_project(&other.id, &rename).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[actix_rt::test]
    async fn missing_ids_are_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.delete_project(&id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            store.update_project(&id, &ProjectChanges::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.edit_update(&id, &publish(true), Utc::now()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.set_contact_status(&id, ContactStatus::Read).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn first_publication_is_stamped_once() {
        let store = MemoryStore::new();
        let post = store.create_update(&draft("post")).await.unwrap();
        assert!(post.published_at.is_none());

        let t1 = Utc::now();
        let published = store.edit_update(&post.id, &publish(true), t1).await.unwrap();
        assert_eq!(published.published_at, Some(t1));

        let unpublished = store
            .edit_update(&post.id, &publish(false), t1 + Duration::minutes(1))
            .await
            .unwrap();
        assert!(!unpublished.published);
        assert_eq!(unpublished.published_at, Some(t1));

        let again = store
            .edit_update(&post.id, &publish(true), t1 + Duration::minutes(2))
            .await
            .unwrap();
        assert!(again.published);
        assert_eq!(again.published_at, Some(t1));
    }

    #[actix_rt::test]
    async fn bot_info_upsert_keeps_a_single_record() {
        let store = MemoryStore::new();
        assert!(matches!(store.get_bot_info().await, Err(AppError::NotFound(_))));

        let mut bot = BotInfoUpsert {
            name: "Bot".into(),
            tagline: "t".into(),
            description: "d".into(),
            demo_url: None,
            github_repo: "https://github.com/me/bot".into(),
            screenshots: None,
            features: Some(vec!["a".into()]),
        };
        let first = store.upsert_bot_info(&bot).await.unwrap();

        bot.name = "Bot v2".into();
        bot.features = None;
        let second = store.upsert_bot_info(&bot).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Bot v2");
        assert_eq!(second.features, vec!["a"]);
        assert!(!store.insert_bot_info_if_absent(&bot).await.unwrap());
    }

    #[actix_rt::test]
    async fn admin_email_is_unique_case_insensitively() {
        let store = MemoryStore::new();
        store
            .create_admin(&AdminUserInsert::new("Admin@Example.com", "hash".into()))
            .await
            .unwrap();

        let err = store
            .create_admin(&AdminUserInsert::new("admin@example.com", "hash".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(store.get_admin_by_email("ADMIN@example.com").await.unwrap().is_some());
    }
}
