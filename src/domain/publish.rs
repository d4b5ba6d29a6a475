//! Publication lifecycle of blog posts (`Update` entities).
//!
//! A post is either a draft or published. Only the draft -> published
//! transition has a side effect: it stamps `published_at`, and only the first
//! time. Unpublishing never clears the stamp and re-publishing never moves it.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Draft,
    Published,
}

impl From<bool> for PublishState {
    fn from(published: bool) -> Self {
        if published {
            PublishState::Published
        } else {
            PublishState::Draft
        }
    }
}

impl PublishState {
    pub fn is_published(self) -> bool {
        matches!(self, PublishState::Published)
    }
}

/// `published_at` for a freshly created post.
pub fn published_at_on_create(published: bool, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    published.then_some(now)
}

/// `published_at` after an edit.
///
/// `incoming` is `None` when the edit does not touch the `published` flag.
pub fn published_at_on_update(
    previous: PublishState,
    incoming: Option<bool>,
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let next = incoming.map(PublishState::from).unwrap_or(previous);

    match (previous, next) {
        (PublishState::Draft, PublishState::Published) => current.or(Some(now)),
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn create_published_stamps_now() {
        let now = Utc::now();
        assert_eq!(published_at_on_create(true, now), Some(now));
        assert_eq!(published_at_on_create(false, now), None);
    }

    #[test]
    fn first_publication_stamps() {
        let now = Utc::now();
        let stamped = published_at_on_update(PublishState::Draft, Some(true), None, now);
        assert_eq!(stamped, Some(now));
    }

    #[test]
    fn self_transitions_leave_timestamp_alone() {
        let first = Utc::now() - Duration::days(3);
        let now = Utc::now();
        assert_eq!(
            published_at_on_update(PublishState::Published, Some(true), Some(first), now),
            Some(first)
        );
        assert_eq!(published_at_on_update(PublishState::Draft, Some(false), None, now), None);
        assert_eq!(published_at_on_update(PublishState::Draft, None, None, now), None);
    }

    #[test]
    fn unpublish_keeps_stamp() {
        let first = Utc::now() - Duration::hours(1);
        let now = Utc::now();
        assert_eq!(
            published_at_on_update(PublishState::Published, Some(false), Some(first), now),
            Some(first)
        );
    }

    #[test]
    fn republish_does_not_overwrite_first_stamp() {
        let first = Utc::now() - Duration::days(10);
        let later = Utc::now();
        let after_unpublish =
            published_at_on_update(PublishState::Published, Some(false), Some(first), later);
        let after_republish =
            published_at_on_update(PublishState::Draft, Some(true), after_unpublish, later);
        assert_eq!(after_republish, Some(first));
    }
}
