//! Human-readable URL identifiers derived from titles.
//!
//! Slugs are only derived here. Uniqueness is owned by the storage layer,
//! which rejects a colliding slug with `AppError::Conflict`.

use crate::errors::AppError;

/// Longest slug ever persisted. Transliteration can make a slug several
/// times longer than its title.
pub const MAX_SLUG_LENGTH: usize = 200;

/// Maps a title to a lowercase `[a-z0-9-]` token.
///
/// Runs of whitespace and punctuation collapse into one hyphen and the result
/// never starts or ends with a hyphen. Non-ASCII letters are transliterated
/// first, so "Café Déjà Vu" becomes `cafe-deja-vu`.
pub fn generate_slug(title: &str) -> String {
    ::slug::slugify(title)
}

/// Slug for a title that is about to be persisted.
///
/// A title made only of punctuation yields an empty slug; such titles are
/// rejected instead of occupying the empty key. Long slugs are cut back to a
/// word boundary within `MAX_SLUG_LENGTH`.
pub fn slug_for_title(title: &str) -> Result<String, AppError> {
    let slug = truncate_slug(generate_slug(title));
    if slug.is_empty() {
        return Err(AppError::invalid_field(
            "title",
            "Title must contain at least one letter or digit",
        ));
    }
    Ok(slug)
}

fn truncate_slug(mut slug: String) -> String {
    if slug.len() <= MAX_SLUG_LENGTH {
        return slug;
    }

    // slugs are ASCII, so byte offsets are char boundaries
    let cut_mid_word = slug.as_bytes()[MAX_SLUG_LENGTH] != b'-';
    slug.truncate(MAX_SLUG_LENGTH);
    if cut_mid_word {
        if let Some(boundary) = slug.rfind('-') {
            slug.truncate(boundary);
        }
    }
    slug.trim_end_matches('-').to_string()
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
}
