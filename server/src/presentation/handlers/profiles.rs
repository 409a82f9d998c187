use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::profile_service::ProfilePosts;
use crate::domain::user::{UpdateProfileRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::posts::{PageQuery, PostListItemDto};
use crate::presentation::middleware::auth::{AuthenticatedUser, MaybeAuthenticatedUser};

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProfileDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProfilePostsResponseDto {
    pub(crate) profile: ProfileDto,
    pub(crate) posts: Vec<PostListItemDto>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateProfileDto {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[validate(email)]
    pub(crate) email: String,
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
}

/// Own-profile view: includes the email, unlike the public ProfileDto.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct OwnProfileDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<User> for ProfileDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

impl From<User> for OwnProfileDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

impl From<ProfilePosts> for ProfilePostsResponseDto {
    fn from(result: ProfilePosts) -> Self {
        Self {
            profile: result.profile.into(),
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
    path = "/api/profiles/{username}/posts",
    tag = "profiles",
    params(
        ("username" = String, Path, description = "Profile username"),
        ("page" = Option<u32>, Query, description = "1-based page number; clamped to the valid range")
    ),
    responses(
        (status = 200, description = "The user's posts; the owner sees all of them", body = ProfilePostsResponseDto),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn profile_posts(
    State(state): State<AppState>,
    MaybeAuthenticatedUser(viewer): MaybeAuthenticatedUser,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<(StatusCode, Json<ProfilePostsResponseDto>)> {
    let result = state
        .profile_service
        .profile_posts(&username, viewer, query.page.unwrap_or(1))
        .await?;

    Ok((StatusCode::OK, Json(ProfilePostsResponseDto::from(result))))
}

#[utoipa::path(
    put,
    path = "/api/profiles/me",
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = OwnProfileDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Username or email already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<UpdateProfileDto>,
) -> AppResult<(StatusCode, Json<OwnProfileDto>)> {
    dto.validate()?;
    let req = UpdateProfileRequest {
        username: dto.username,
        email: dto.email,
        first_name: dto.first_name,
        last_name: dto.last_name,
    };

    let user = state
        .profile_service
        .update_profile(auth.user_id, req)
        .await?;
    Ok((StatusCode::OK, Json(OwnProfileDto::from(user))))
}
