use chrono::Utc;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::PostRepository;
use crate::domain::comment::{Comment, CommentTextRequest};
use crate::domain::error::DomainError;
use crate::domain::policy;

pub(crate) struct CommentService<C: CommentRepository, P: PostRepository> {
    comments: C,
    posts: P,
}

impl<C: CommentRepository, P: PostRepository> CommentService<C, P> {
    pub(crate) fn new(comments: C, posts: P) -> Self {
        Self { comments, posts }
    }

    /// Comments may only be created against posts that are publicly visible
    /// right now; the rule holds even for the post's own author.
    pub(crate) async fn create_comment(
        &self,
        actor_id: i64,
        post_id: i64,
        req: CommentTextRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;

        let post = self
            .posts
            .get_post(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;
        if !policy::is_publicly_visible(&post, Utc::now()) {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }

        self.comments
            .create_comment(NewComment {
                text: req.text,
                post_id,
                author_id: actor_id,
            })
            .await
    }

    pub(crate) async fn update_comment(
        &self,
        actor_id: i64,
        post_id: i64,
        comment_id: i64,
        req: CommentTextRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;

        let comment = self.require_comment(post_id, comment_id).await?;
        if !policy::can_mutate(&comment, actor_id) {
            return Err(DomainError::NotOwner);
        }

        self.comments
            .update_comment(comment_id, req.text)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment id: {comment_id}")))
    }

    pub(crate) async fn delete_comment(
        &self,
        actor_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        let comment = self.require_comment(post_id, comment_id).await?;
        if !policy::can_mutate(&comment, actor_id) {
            return Err(DomainError::NotOwner);
        }

        let deleted = self.comments.delete_comment(comment_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("comment id: {comment_id}")));
        }
        Ok(())
    }

    async fn require_comment(
        &self,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Comment, DomainError> {
        let comment = self
            .comments
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment id: {comment_id}")))?;

        // a comment id under a foreign post id is treated as absent
        if comment.post_id != post_id {
            return Err(DomainError::NotFound(format!("comment id: {comment_id}")));
        }
        Ok(comment)
    }
}
