//! Fake repositories and sample builders shared by the service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::{NewPost, Pagination, PostFilter, PostPatch, PostRepository};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::{CategoryRef, Post, PostSummary};
use crate::domain::published::Published;

#[derive(Clone, Default)]
pub(crate) struct FakePostRepo {
    pub(crate) post_for_get: Arc<Mutex<Option<Post>>>,
    pub(crate) created_input: Arc<Mutex<Option<NewPost>>>,
    pub(crate) update_call: Arc<Mutex<Option<(i64, PostPatch)>>>,
    pub(crate) update_result: Arc<Mutex<Option<Post>>>,
    pub(crate) deleted_ids: Arc<Mutex<Vec<i64>>>,
    pub(crate) list_result: Arc<Mutex<Vec<PostSummary>>>,
    pub(crate) total_result: Arc<Mutex<i64>>,
    pub(crate) last_filter: Arc<Mutex<Option<PostFilter>>>,
    pub(crate) last_pagination: Arc<Mutex<Option<Pagination>>>,
}

impl FakePostRepo {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_post(&self, post: Option<Post>) {
        *self.post_for_get.lock().expect("post mutex poisoned") = post;
    }

    pub(crate) fn set_listing(&self, posts: Vec<PostSummary>, total: i64) {
        *self.list_result.lock().expect("list mutex poisoned") = posts;
        *self.total_result.lock().expect("total mutex poisoned") = total;
    }

    pub(crate) fn last_filter(&self) -> Option<PostFilter> {
        *self.last_filter.lock().expect("filter mutex poisoned")
    }

    pub(crate) fn deleted_ids(&self) -> Vec<i64> {
        self.deleted_ids
            .lock()
            .expect("deleted mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl PostRepository for FakePostRepo {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let post = Post {
            id: 1,
            title: input.title.clone(),
            text: input.text.clone(),
            image: input.image.clone(),
            pub_date: input.pub_date,
            author_id: input.author_id,
            author_username: "author".to_string(),
            location: None,
            category: None,
            published: Published::new(input.is_published, Utc::now()),
        };
        *self.created_input.lock().expect("created mutex poisoned") = Some(input);
        Ok(post)
    }

    async fn get_post(&self, _id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.post_for_get.lock().expect("post mutex poisoned").clone())
    }

    async fn update_post(
        &self,
        post_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        *self.update_call.lock().expect("update mutex poisoned") = Some((post_id, patch));
        Ok(self
            .update_result
            .lock()
            .expect("update result mutex poisoned")
            .clone())
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        self.deleted_ids
            .lock()
            .expect("deleted mutex poisoned")
            .push(id);
        Ok(true)
    }

    async fn list_posts(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> Result<Vec<PostSummary>, DomainError> {
        *self.last_filter.lock().expect("filter mutex poisoned") = Some(filter);
        *self
            .last_pagination
            .lock()
            .expect("pagination mutex poisoned") = Some(pagination);
        Ok(self.list_result.lock().expect("list mutex poisoned").clone())
    }

    async fn count_posts(&self, filter: PostFilter) -> Result<i64, DomainError> {
        *self.last_filter.lock().expect("filter mutex poisoned") = Some(filter);
        Ok(*self.total_result.lock().expect("total mutex poisoned"))
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeCommentRepo {
    pub(crate) comment_for_get: Arc<Mutex<Option<Comment>>>,
    pub(crate) created_input: Arc<Mutex<Option<NewComment>>>,
    pub(crate) update_call: Arc<Mutex<Option<(i64, String)>>>,
    pub(crate) deleted_ids: Arc<Mutex<Vec<i64>>>,
    pub(crate) list_result: Arc<Mutex<Vec<Comment>>>,
}

impl FakeCommentRepo {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_comment(&self, comment: Option<Comment>) {
        *self
            .comment_for_get
            .lock()
            .expect("comment mutex poisoned") = comment;
    }

    pub(crate) fn created_input(&self) -> Option<NewComment> {
        self.created_input
            .lock()
            .expect("created mutex poisoned")
            .clone()
    }

    pub(crate) fn deleted_ids(&self) -> Vec<i64> {
        self.deleted_ids
            .lock()
            .expect("deleted mutex poisoned")
            .clone()
    }

    pub(crate) fn update_call(&self) -> Option<(i64, String)> {
        self.update_call
            .lock()
            .expect("update mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl CommentRepository for FakeCommentRepo {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let comment = Comment {
            id: 1,
            text: input.text.clone(),
            post_id: input.post_id,
            author_id: input.author_id,
            author_username: "commenter".to_string(),
            created_at: Utc::now(),
        };
        *self.created_input.lock().expect("created mutex poisoned") = Some(input);
        Ok(comment)
    }

    async fn get_comment(&self, _id: i64) -> Result<Option<Comment>, DomainError> {
        Ok(self
            .comment_for_get
            .lock()
            .expect("comment mutex poisoned")
            .clone())
    }

    async fn update_comment(&self, id: i64, text: String) -> Result<Option<Comment>, DomainError> {
        *self.update_call.lock().expect("update mutex poisoned") = Some((id, text.clone()));
        let mut updated = self
            .comment_for_get
            .lock()
            .expect("comment mutex poisoned")
            .clone();
        if let Some(comment) = updated.as_mut() {
            comment.text = text;
        }
        Ok(updated)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, DomainError> {
        self.deleted_ids
            .lock()
            .expect("deleted mutex poisoned")
            .push(id);
        Ok(true)
    }

    async fn list_for_post(&self, _post_id: i64) -> Result<Vec<Comment>, DomainError> {
        Ok(self.list_result.lock().expect("list mutex poisoned").clone())
    }
}

pub(crate) fn sample_post(
    id: i64,
    author_id: i64,
    is_published: bool,
    category_published: Option<bool>,
    hours_ago: i64,
) -> Post {
    Post {
        id,
        title: "Title".to_string(),
        text: "Text".to_string(),
        image: "post_images/img.png".to_string(),
        pub_date: Utc::now() - Duration::hours(hours_ago),
        author_id,
        author_username: "author".to_string(),
        location: None,
        category: category_published.map(|is_published| CategoryRef {
            id: 7,
            title: "Travel".to_string(),
            slug: "travel".to_string(),
            is_published,
        }),
        published: Published::new(is_published, Utc::now()),
    }
}

pub(crate) fn sample_comment(id: i64, post_id: i64, author_id: i64) -> Comment {
    Comment {
        id,
        text: "nice post".to_string(),
        post_id,
        author_id,
        author_username: "commenter".to_string(),
        created_at: Utc::now(),
    }
}
