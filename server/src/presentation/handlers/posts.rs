use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::paging::PostPage;
use crate::application::post_service::PostDetail;
use crate::domain::post::{
    CategoryRef, CreatePostRequest, LocationRef, Post, PostSummary, UpdatePostRequest,
};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::comments::CommentDto;
use crate::presentation::middleware::auth::{AuthenticatedUser, MaybeAuthenticatedUser};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 256))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) text: String,
    #[validate(length(min = 1))]
    pub(crate) image: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) is_published: Option<bool>,
    pub(crate) location_id: Option<i64>,
    pub(crate) category_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1, max = 256))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) text: String,
    #[validate(length(min = 1))]
    pub(crate) image: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) is_published: Option<bool>,
    pub(crate) location_id: Option<i64>,
    pub(crate) category_id: Option<i64>,
}

/// 1-based page selector; malformed and out-of-range values clamp rather
/// than error.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct PageQuery {
    #[serde(default, deserialize_with = "lenient_page")]
    pub(crate) page: Option<u32>,
}

// a page value that is not a positive number falls back to the default
// instead of failing the request
fn lenient_page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryRefDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) slug: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LocationRefDto {
    pub(crate) id: i64,
    pub(crate) name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) image: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) is_published: bool,
    pub(crate) author_id: i64,
    pub(crate) author_username: String,
    pub(crate) category: Option<CategoryRefDto>,
    pub(crate) location: Option<LocationRefDto>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostListItemDto {
    pub(crate) post: PostDto,
    pub(crate) comment_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) posts: Vec<PostListItemDto>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailDto {
    pub(crate) post: PostDto,
    pub(crate) comment_count: i64,
    pub(crate) comments: Vec<CommentDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            text: post.text,
            image: post.image,
            pub_date: post.pub_date,
            is_published: post.published.is_published,
            author_id: post.author_id,
            author_username: post.author_username,
            category: post.category.map(CategoryRefDto::from),
            location: post.location.map(LocationRefDto::from),
            created_at: post.published.created_at,
        }
    }
}

impl From<CategoryRef> for CategoryRefDto {
    fn from(category: CategoryRef) -> Self {
        Self {
            id: category.id,
            title: category.title,
            slug: category.slug,
        }
    }
}

impl From<LocationRef> for LocationRefDto {
    fn from(location: LocationRef) -> Self {
        Self {
            id: location.id,
            name: location.name,
        }
    }
}

impl From<PostSummary> for PostListItemDto {
    fn from(summary: PostSummary) -> Self {
        Self {
            post: summary.post.into(),
            comment_count: summary.comment_count,
        }
    }
}

impl From<PostPage> for ListPostsResponseDto {
    fn from(page: PostPage) -> Self {
        Self {
            posts: page.posts.into_iter().map(PostListItemDto::from).collect(),
            page: page.page,
            page_size: page.page_size,
            total: page.total,
        }
    }
}

impl From<PostDetail> for PostDetailDto {
    fn from(detail: PostDetail) -> Self {
        Self {
            post: detail.post.into(),
            comment_count: detail.comments.len() as i64,
            comments: detail.comments.into_iter().map(CommentDto::from).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number; clamped to the valid range")
    ),
    responses(
        (status = 200, description = "Publicly visible posts, newest first", body = ListPostsResponseDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    let page = state
        .post_service
        .list_index(query.page.unwrap_or(1))
        .await?;

    Ok((StatusCode::OK, Json(ListPostsResponseDto::from(page))))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post with its comments", body = PostDetailDto),
        (status = 404, description = "Post absent or not visible to the viewer"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    MaybeAuthenticatedUser(viewer): MaybeAuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<PostDetailDto>)> {
    let detail = state.post_service.post_detail(viewer, id).await?;

    Ok((StatusCode::OK, Json(PostDetailDto::from(detail))))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title,
        text: dto.text,
        image: dto.image,
        pub_date: dto.pub_date,
        is_published: dto.is_published.unwrap_or(true),
        location_id: dto.location_id,
        category_id: dto.category_id,
    };

    let post = state.post_service.create_post(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 303, description = "Actor is not the author; redirected to the index listing"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = UpdatePostRequest {
        title: dto.title,
        text: dto.text,
        image: dto.image,
        pub_date: dto.pub_date,
        is_published: dto.is_published.unwrap_or(true),
        location_id: dto.location_id,
        category_id: dto.category_id,
    };

    let post = state
        .post_service
        .update_post(auth.user_id, id, req)
        .await?;
    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 303, description = "Actor is not the author; redirected to the index listing"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.post_service.delete_post(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
