use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::category_service::CategoryPosts;
use crate::domain::category::Category;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::posts::{PageQuery, PostListItemDto};

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) slug: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryPostsResponseDto {
    pub(crate) category: CategoryDto,
    pub(crate) posts: Vec<PostListItemDto>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total: i64,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            title: category.title,
            description: category.description,
            slug: category.slug,
        }
    }
}

impl From<CategoryPosts> for CategoryPostsResponseDto {
    fn from(result: CategoryPosts) -> Self {
        Self {
            category: result.category.into(),
            posts: result
                .page
                .posts
                .into_iter()
                .map(PostListItemDto::from)
                .collect(),
            page: result.page.page,
            page_size: result.page.page_size,
            total: result.page.total,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}/posts",
    tag = "categories",
    params(
        ("slug" = String, Path, description = "Category slug"),
        ("page" = Option<u32>, Query, description = "1-based page number; clamped to the valid range")
    ),
    responses(
        (status = 200, description = "Publicly visible posts in the category", body = CategoryPostsResponseDto),
        (status = 404, description = "Category absent or unpublished"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn category_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<(StatusCode, Json<CategoryPostsResponseDto>)> {
    let result = state
        .category_service
        .posts_in_category(&slug, query.page.unwrap_or(1))
        .await?;

    Ok((StatusCode::OK, Json(CategoryPostsResponseDto::from(result))))
}
