use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{
    option_fields::OptionField,
    validation::{
        normalize_optional, validate_image_refs, validate_labels, validate_non_null_flag,
        validate_not_blank, validate_optional_image_refs, validate_optional_labels,
        validate_optional_title, validate_optional_url, validate_optional_url_field,
        validate_required_text_field, validate_title, MAX_TITLE_LENGTH,
    },
};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub stack: Vec<String>,
    pub images: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub stack: Vec<String>,
    pub images: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Resolved field changes for one project. `None` leaves the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub stack: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub github_url: Option<Option<String>>,
    pub live_url: Option<Option<String>>,
    pub featured: Option<bool>,
}

impl ProjectChanges {
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(title) = &self.title {
            project.title = title.clone();
        }
        if let Some(slug) = &self.slug {
            project.slug = slug.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(stack) = &self.stack {
            project.stack = stack.clone();
        }
        if let Some(images) = &self.images {
            project.images = images.clone();
        }
        if let Some(github_url) = &self.github_url {
            project.github_url = github_url.clone();
        }
        if let Some(live_url) = &self.live_url {
            project.live_url = live_url.clone();
        }
        if let Some(featured) = self.featured {
            project.featured = featured;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ProjectFilter {
    pub featured: Option<bool>,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectRequest {
    #[validate(
        length(max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,

    #[validate(custom(function = "validate_labels"))]
    pub stack: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_image_refs"))]
    pub images: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_optional_url"))]
    pub github_url: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_optional_url"))]
    pub live_url: Option<String>,

    #[serde(default)]
    pub featured: bool,
}

impl NewProjectRequest {
    pub fn prepare_for_insert(self, slug: String) -> ProjectInsert {
        ProjectInsert {
            title: self.title,
            slug,
            description: self.description,
            stack: self.stack,
            images: self.images,
            github_url: normalize_optional(self.github_url),
            live_url: normalize_optional(self.live_url),
            featured: self.featured,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct EditProjectRequest {
    #[validate(custom(function = "validate_optional_title"))]
    pub title: OptionField<String>,

    #[validate(custom(function = "validate_required_text_field"))]
    pub description: OptionField<String>,

    #[validate(custom(function = "validate_optional_labels"))]
    pub stack: OptionField<Vec<String>>,

    #[validate(custom(function = "validate_optional_image_refs"))]
    pub images: OptionField<Vec<String>>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub github_url: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub live_url: OptionField<String>,

    #[validate(custom(function = "validate_non_null_flag"))]
    pub featured: OptionField<bool>,
}

impl EditProjectRequest {
    /// `slug` is the re-derived slug when the title changed.
    pub fn into_changes(self, slug: Option<String>) -> ProjectChanges {
        ProjectChanges {
            title: self.title.flatten(),
            slug,
            description: self.description.flatten(),
            stack: self.stack.flatten(),
            images: self.images.flatten(),
            github_url: self.github_url.into_option().map(normalize_optional),
            live_url: self.live_url.into_option().map(normalize_optional),
            featured: self.featured.flatten(),
        }
    }
}
