use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostSummary};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) image: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) is_published: bool,
    pub(crate) author_id: i64,
    pub(crate) location_id: Option<i64>,
    pub(crate) category_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) image: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) is_published: bool,
    pub(crate) location_id: Option<i64>,
    pub(crate) category_id: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Pagination {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
}

/// Candidate selection for listings. `public_only` applies the
/// viewer-independent visibility predicate in the store; listings for a
/// profile owner clear it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PostFilter {
    pub(crate) category_id: Option<i64>,
    pub(crate) author_id: Option<i64>,
    pub(crate) public_only: bool,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update_post(&self, post_id: i64, patch: PostPatch)
    -> Result<Option<Post>, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    /// Ordered by pub_date descending, each item annotated with its comment
    /// count.
    async fn list_posts(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> Result<Vec<PostSummary>, DomainError>;
    async fn count_posts(&self, filter: PostFilter) -> Result<i64, DomainError>;
}
