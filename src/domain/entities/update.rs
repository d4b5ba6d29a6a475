use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::publish::PublishState,
    entities::{
        option_fields::OptionField,
        validation::{
            validate_labels, validate_non_null_flag, validate_not_blank,
            validate_optional_labels, validate_optional_title, validate_required_text_field,
            validate_title, MAX_TITLE_LENGTH,
        },
    },
    utils::markdown::safe_markdown_to_html,
};

// ───── Database Models ───────────────────────────────────────────────

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content_markdown: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Update {
    pub fn publish_state(&self) -> PublishState {
        PublishState::from(self.published)
    }

    pub fn to_detail_response(&self) -> UpdateDetailResponse {
        UpdateDetailResponse {
            content_html: safe_markdown_to_html(&self.content_markdown),
            update: self.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateInsert {
    pub title: String,
    pub slug: String,
    pub content_markdown: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Resolved field changes for one post. `published_at` is not part of it:
/// the store derives it from the stored and incoming `published` values.
#[derive(Debug, Clone, Default)]
pub struct UpdateChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content_markdown: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UpdateFilter {
    pub published: Option<bool>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailResponse {
    #[serde(flatten)]
    pub update: Update,
    pub content_html: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUpdateRequest {
    #[validate(
        length(max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub content_markdown: String,

    #[validate(custom(function = "validate_labels"))]
    pub tags: Vec<String>,

    #[serde(default)]
    pub published: bool,
}

impl NewUpdateRequest {
    pub fn prepare_for_insert(
        self,
        slug: String,
        published_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> UpdateInsert {
        UpdateInsert {
            title: self.title,
            slug,
            content_markdown: self.content_markdown,
            tags: self.tags,
            published: self.published,
            published_at,
            created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct EditUpdateRequest {
    #[validate(custom(function = "validate_optional_title"))]
    pub title: OptionField<String>,

    #[validate(custom(function = "validate_required_text_field"))]
    pub content_markdown: OptionField<String>,

    #[validate(custom(function = "validate_optional_labels"))]
    pub tags: OptionField<Vec<String>>,

    #[validate(custom(function = "validate_non_null_flag"))]
    pub published: OptionField<bool>,
}

impl EditUpdateRequest {
    pub fn into_changes(self, slug: Option<String>) -> UpdateChanges {
        UpdateChanges {
            title: self.title.flatten(),
            slug,
            content_markdown: self.content_markdown.flatten(),
            tags: self.tags.flatten(),
            published: self.published.flatten(),
        }
    }
}
