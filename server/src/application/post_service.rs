use chrono::Utc;

use crate::application::paging::{PostPage, list_page};
use crate::data::comment_repository::CommentRepository;
use crate::data::post_repository::{NewPost, PostFilter, PostPatch, PostRepository};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::policy;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

/// Detail page payload: the post plus its comments in creation order.
#[derive(Debug, Clone)]
pub(crate) struct PostDetail {
    pub(crate) post: Post,
    pub(crate) comments: Vec<Comment>,
}

pub(crate) struct PostService<P: PostRepository, C: CommentRepository> {
    posts: P,
    comments: C,
}

impl<P: PostRepository, C: CommentRepository> PostService<P, C> {
    pub(crate) fn new(posts: P, comments: C) -> Self {
        Self { posts, comments }
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            text: req.text,
            image: req.image,
            pub_date: req.pub_date,
            is_published: req.is_published,
            author_id,
            location_id: req.location_id,
            category_id: req.category_id,
        };
        self.posts.create_post(new_post).await
    }

    /// Detail view. A post hidden from the viewer surfaces as NotFound so
    /// non-authors cannot probe for its existence.
    pub(crate) async fn post_detail(
        &self,
        viewer: Option<i64>,
        post_id: i64,
    ) -> Result<PostDetail, DomainError> {
        let post = self.require_post(post_id).await?;

        if !policy::is_visible_to(&post, viewer, Utc::now()) {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }

        let comments = self.comments.list_for_post(post_id).await?;
        Ok(PostDetail { post, comments })
    }

    pub(crate) async fn update_post(
        &self,
        actor_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let post = self.require_post(post_id).await?;
        if !policy::can_mutate(&post, actor_id) {
            return Err(DomainError::NotOwner);
        }

        let patch = PostPatch {
            title: req.title,
            text: req.text,
            image: req.image,
            pub_date: req.pub_date,
            is_published: req.is_published,
            location_id: req.location_id,
            category_id: req.category_id,
        };
        self.posts
            .update_post(post_id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))
    }

    pub(crate) async fn delete_post(&self, actor_id: i64, post_id: i64) -> Result<(), DomainError> {
        let post = self.require_post(post_id).await?;
        if !policy::can_mutate(&post, actor_id) {
            return Err(DomainError::NotOwner);
        }

        let deleted = self.posts.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        Ok(())
    }

    /// Homepage listing: publicly visible posts only.
    pub(crate) async fn list_index(&self, page: u32) -> Result<PostPage, DomainError> {
        let filter = PostFilter {
            public_only: true,
            ..PostFilter::default()
        };
        list_page(&self.posts, filter, page).await
    }

    async fn require_post(&self, post_id: i64) -> Result<Post, DomainError> {
        self.posts
            .get_post(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::PostService;
    use crate::application::test_support::{
        FakeCommentRepo, FakePostRepo, sample_comment, sample_post,
    };
    use crate::domain::error::DomainError;
    use crate::domain::post::{CreatePostRequest, UpdatePostRequest};

    const AUTHOR: i64 = 10;
    const STRANGER: i64 = 99;

    fn service(posts: FakePostRepo, comments: FakeCommentRepo) -> PostService<FakePostRepo, FakeCommentRepo> {
        PostService::new(posts, comments)
    }

    fn update_request() -> UpdatePostRequest {
        UpdatePostRequest {
            title: "New title".to_string(),
            text: "New text".to_string(),
            image: "post_images/new.png".to_string(),
            pub_date: Utc::now(),
            is_published: true,
            location_id: None,
            category_id: Some(7),
        }
    }

    #[tokio::test]
    async fn create_post_sets_author_from_actor() {
        let posts = FakePostRepo::new();
        let service = service(posts.clone(), FakeCommentRepo::new());

        let req = CreatePostRequest {
            title: "  Title  ".to_string(),
            text: "Text".to_string(),
            image: "post_images/img.png".to_string(),
            pub_date: Utc::now(),
            is_published: true,
            location_id: None,
            category_id: Some(7),
        };

        let created = service
            .create_post(AUTHOR, req)
            .await
            .expect("create must succeed");
        assert_eq!(created.author_id, AUTHOR);
        assert_eq!(created.title, "Title");

        let input = posts
            .created_input
            .lock()
            .expect("created mutex poisoned")
            .clone()
            .expect("input captured");
        assert_eq!(input.author_id, AUTHOR);
    }

    #[tokio::test]
    async fn detail_of_hidden_post_is_not_found_for_strangers_and_anonymous() {
        let posts = FakePostRepo::new();
        posts.set_post(Some(sample_post(1, AUTHOR, false, Some(true), 1)));
        let service = service(posts, FakeCommentRepo::new());

        let err = service
            .post_detail(None, 1)
            .await
            .expect_err("anonymous must not see it");
        assert!(matches!(err, DomainError::NotFound(_)));

        let err = service
            .post_detail(Some(STRANGER), 1)
            .await
            .expect_err("stranger must not see it");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn detail_of_hidden_post_is_served_to_its_author() {
        let posts = FakePostRepo::new();
        posts.set_post(Some(sample_post(1, AUTHOR, false, None, -24)));
        let comments = FakeCommentRepo::new();
        *comments.list_result.lock().expect("list mutex poisoned") =
            vec![sample_comment(5, 1, STRANGER)];
        let service = service(posts, comments);

        let detail = service
            .post_detail(Some(AUTHOR), 1)
            .await
            .expect("author must see own post");
        assert_eq!(detail.post.id, 1);
        assert_eq!(detail.comments.len(), 1);
    }

    #[tokio::test]
    async fn detail_of_public_post_is_served_to_anonymous_viewer() {
        let posts = FakePostRepo::new();
        posts.set_post(Some(sample_post(1, AUTHOR, true, Some(true), 24)));
        let service = service(posts, FakeCommentRepo::new());

        let detail = service
            .post_detail(None, 1)
            .await
            .expect("public post must be visible");
        assert_eq!(detail.post.id, 1);
    }

    #[tokio::test]
    async fn update_by_non_author_is_not_owner_and_never_reaches_repo() {
        let posts = FakePostRepo::new();
        posts.set_post(Some(sample_post(1, AUTHOR, true, Some(true), 1)));
        let service = service(posts.clone(), FakeCommentRepo::new());

        let err = service
            .update_post(STRANGER, 1, update_request())
            .await
            .expect_err("must be denied");
        assert!(matches!(err, DomainError::NotOwner));
        assert!(
            posts
                .update_call
                .lock()
                .expect("update mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn update_by_author_applies_patch() {
        let posts = FakePostRepo::new();
        posts.set_post(Some(sample_post(1, AUTHOR, true, Some(true), 1)));
        *posts
            .update_result
            .lock()
            .expect("update result mutex poisoned") =
            Some(sample_post(1, AUTHOR, true, Some(true), 1));
        let service = service(posts.clone(), FakeCommentRepo::new());

        service
            .update_post(AUTHOR, 1, update_request())
            .await
            .expect("update must succeed");

        let (post_id, patch) = posts
            .update_call
            .lock()
            .expect("update mutex poisoned")
            .clone()
            .expect("update call captured");
        assert_eq!(post_id, 1);
        assert_eq!(patch.title, "New title");
    }

    #[tokio::test]
    async fn delete_by_non_author_is_not_owner_and_post_survives() {
        let posts = FakePostRepo::new();
        posts.set_post(Some(sample_post(1, AUTHOR, true, Some(true), 1)));
        let service = service(posts.clone(), FakeCommentRepo::new());

        let err = service
            .delete_post(STRANGER, 1)
            .await
            .expect_err("must be denied");
        assert!(matches!(err, DomainError::NotOwner));
        assert!(posts.deleted_ids().is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_post_is_not_found() {
        let posts = FakePostRepo::new();
        posts.set_post(None);
        let service = service(posts, FakeCommentRepo::new());

        let err = service
            .delete_post(AUTHOR, 42)
            .await
            .expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn index_listing_is_public_only_and_clamps_page() {
        let posts = FakePostRepo::new();
        let summary = crate::domain::post::PostSummary {
            post: sample_post(1, AUTHOR, true, Some(true), 24),
            comment_count: 3,
        };
        posts.set_listing(vec![summary], 11);
        let service = service(posts.clone(), FakeCommentRepo::new());

        let page = service.list_index(99).await.expect("listing must succeed");
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total, 11);
        assert_eq!(page.posts[0].comment_count, 3);

        let filter = posts.last_filter().expect("filter captured");
        assert!(filter.public_only);
        assert_eq!(filter.author_id, None);
        assert_eq!(filter.category_id, None);

        let pagination = posts
            .last_pagination
            .lock()
            .expect("pagination mutex poisoned")
            .expect("pagination captured");
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.page_size, 10);
    }
}
