//! Visibility and authorship rules for posts and comments.
//!
//! Every function takes the acting user and the clock explicitly; nothing
//! here reads ambient request state.

use chrono::{DateTime, Utc};

use super::post::Post;

/// Implemented by entities whose mutation rights belong to their creator.
pub(crate) trait Authored {
    fn author_id(&self) -> i64;
}

/// Viewer-independent visibility: the post is published, its category is
/// present and published, and its publication date is not in the future.
pub(crate) fn is_publicly_visible(post: &Post, now: DateTime<Utc>) -> bool {
    post.published.is_published
        && post
            .category
            .as_ref()
            .is_some_and(|category| category.is_published)
        && post.pub_date <= now
}

/// The author always sees their own post; everyone else only sees it when
/// it is publicly visible.
pub(crate) fn is_visible_to(post: &Post, viewer: Option<i64>, now: DateTime<Utc>) -> bool {
    viewer == Some(post.author_id) || is_publicly_visible(post, now)
}

/// Edit/delete rights: only the entity's author.
pub(crate) fn can_mutate<E: Authored>(entity: &E, actor_id: i64) -> bool {
    entity.author_id() == actor_id
}
