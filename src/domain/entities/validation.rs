use std::borrow::Cow;

use validator::ValidationError;

use crate::entities::option_fields::OptionField;

pub const MAX_TITLE_LENGTH: u64 = 160;
pub const MAX_LIST_ITEMS: usize = 50;
pub const MAX_LIST_ITEM_LENGTH: usize = 200;

// ───── Scalars ──────────────────────────────────────────────────────

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(new_validation_error("title_blank", "Title is required"));
    }
    if title.trim().len() != title.len() {
        return Err(new_validation_error("title_whitespace", "Title must not have leading or trailing whitespace"));
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("blank", "Value cannot be empty"));
    }
    Ok(())
}

/// Optional link: empty string stands for "no link".
pub fn validate_optional_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Ok(());
    }
    validate_url(url)
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

// ───── Lists ────────────────────────────────────────────────────────

/// Image references are either web URLs or inline `data:image/...` URLs.
pub fn validate_image_refs(images: &[String]) -> Result<(), ValidationError> {
    if images.len() > MAX_LIST_ITEMS {
        return Err(new_validation_error("too_many_images", "Too many images provided"));
    }
    for image in images {
        let ok = match url::Url::parse(image) {
            Ok(parsed) => match parsed.scheme() {
                "http" | "https" => true,
                "data" => image["data:".len()..].starts_with("image/"),
                _ => false,
            },
            Err(_) => false,
        };
        if !ok {
            return Err(new_validation_error("invalid_image", "Images must be http(s) or data:image URLs"));
        }
    }
    Ok(())
}

/// Free-form labels (stack entries, tags, feature bullets). Order and
/// duplicates are preserved; only emptiness and size are checked.
pub fn validate_labels(labels: &[String]) -> Result<(), ValidationError> {
    if labels.len() > MAX_LIST_ITEMS {
        return Err(new_validation_error("too_many_items", "Too many items provided"));
    }
    for label in labels {
        if label.trim().is_empty() || label.chars().count() > MAX_LIST_ITEM_LENGTH {
            return Err(new_validation_error("invalid_item_length", "Items must be non-empty and at most 200 characters"));
        }
    }
    Ok(())
}

// ───── Partial-update wrappers ──────────────────────────────────────

pub fn validate_optional_title(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(title) => validate_title(title),
        OptionField::SetToNull => Err(new_validation_error("title_null", "Title cannot be null")),
        OptionField::Unchanged => Ok(()),
    }
}

pub fn validate_required_text_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(text) => validate_not_blank(text),
        OptionField::SetToNull => Err(new_validation_error("null", "Value cannot be null")),
        OptionField::Unchanged => Ok(()),
    }
}

pub fn validate_optional_url_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(url) = value {
        validate_optional_url(url)?;
    }
    Ok(())
}

pub fn validate_optional_labels(value: &OptionField<Vec<String>>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(labels) => validate_labels(labels),
        OptionField::SetToNull => Err(new_validation_error("null", "List cannot be null")),
        OptionField::Unchanged => Ok(()),
    }
}

pub fn validate_optional_image_refs(value: &OptionField<Vec<String>>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(images) => validate_image_refs(images),
        OptionField::SetToNull => Err(new_validation_error("null", "List cannot be null")),
        OptionField::Unchanged => Ok(()),
    }
}

pub fn validate_non_null_flag(value: &OptionField<bool>) -> Result<(), ValidationError> {
    if value.is_set_to_null() {
        return Err(new_validation_error("null", "Flag cannot be null"));
    }
    Ok(())
}

// ───── Normalisation ────────────────────────────────────────────────

/// Blank optional strings are stored as absent.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}
