use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::validation::{
    normalize_optional, validate_image_refs, validate_labels, validate_not_blank,
    validate_optional_url, validate_url,
};

/// The flagship bot showcase. At most one row exists.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BotInfo {
    pub id: Uuid,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub demo_url: Option<String>,
    pub github_repo: String,
    pub screenshots: Vec<String>,
    pub features: Vec<String>,
}

/// Values written by an upsert. `None` lists keep the stored list on update
/// and start empty on create.
#[derive(Debug, Clone)]
pub struct BotInfoUpsert {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub demo_url: Option<String>,
    pub github_repo: String,
    pub screenshots: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
}

impl BotInfoUpsert {
    pub fn into_new_record(self, id: Uuid) -> BotInfo {
        BotInfo {
            id,
            name: self.name,
            tagline: self.tagline,
            description: self.description,
            demo_url: self.demo_url,
            github_repo: self.github_repo,
            screenshots: self.screenshots.unwrap_or_default(),
            features: self.features.unwrap_or_default(),
        }
    }

    pub fn apply_to(self, existing: &mut BotInfo) {
        existing.name = self.name;
        existing.tagline = self.tagline;
        existing.description = self.description;
        existing.demo_url = self.demo_url;
        existing.github_repo = self.github_repo;
        if let Some(screenshots) = self.screenshots {
            existing.screenshots = screenshots;
        }
        if let Some(features) = self.features {
            existing.features = features;
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BotInfoRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub tagline: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "validate_optional_url"))]
    pub demo_url: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub github_repo: String,

    #[serde(default)]
    #[validate(custom(function = "validate_image_refs"))]
    pub screenshots: Option<Vec<String>>,

    #[serde(default)]
    #[validate(custom(function = "validate_labels"))]
    pub features: Option<Vec<String>>,
}

impl From<BotInfoRequest> for BotInfoUpsert {
    fn from(request: BotInfoRequest) -> Self {
        BotInfoUpsert {
            name: request.name,
            tagline: request.tagline,
            description: request.description,
            demo_url: normalize_optional(request.demo_url),
            github_repo: request.github_repo,
            screenshots: request.screenshots,
            features: request.features,
        }
    }
}
