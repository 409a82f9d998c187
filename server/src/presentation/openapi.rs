use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::auth::{AuthResponseDto, LoginDto, RegisterDto, UserDto};
use crate::presentation::handlers::categories::{CategoryDto, CategoryPostsResponseDto};
use crate::presentation::handlers::comments::{CommentDto, CommentTextDto};
use crate::presentation::handlers::media::UploadedImageDto;
use crate::presentation::handlers::pages::StaticPageDto;
use crate::presentation::handlers::posts::{
    CategoryRefDto, CreatePostDto, ListPostsResponseDto, LocationRefDto, PageQuery, PostDetailDto,
    PostDto, PostListItemDto, UpdatePostDto,
};
use crate::presentation::handlers::profiles::{
    OwnProfileDto, ProfileDto, ProfilePostsResponseDto, UpdateProfileDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::comments::create_comment,
        crate::presentation::handlers::comments::update_comment,
        crate::presentation::handlers::comments::delete_comment,
        crate::presentation::handlers::categories::category_posts,
        crate::presentation::handlers::profiles::profile_posts,
        crate::presentation::handlers::profiles::update_profile,
        crate::presentation::handlers::media::upload_post_image,
        crate::presentation::handlers::pages::about,
        crate::presentation::handlers::pages::rules
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            AuthResponseDto,
            UserDto,
            CreatePostDto,
            UpdatePostDto,
            PageQuery,
            PostDto,
            PostListItemDto,
            PostDetailDto,
            ListPostsResponseDto,
            CategoryRefDto,
            LocationRefDto,
            CommentDto,
            CommentTextDto,
            CategoryDto,
            CategoryPostsResponseDto,
            ProfileDto,
            OwnProfileDto,
            ProfilePostsResponseDto,
            UpdateProfileDto,
            UploadedImageDto,
            StaticPageDto
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "posts", description = "Post endpoints"),
        (name = "comments", description = "Comment endpoints"),
        (name = "categories", description = "Category listings"),
        (name = "profiles", description = "Profile listings and editing"),
        (name = "media", description = "Image uploads"),
        (name = "pages", description = "Static pages")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
