use std::path::PathBuf;
use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::category_service::CategoryService;
use crate::application::comment_service::CommentService;
use crate::application::post_service::PostService;
use crate::application::profile_service::ProfileService;
use crate::data::repositories::postgres::category_repository::PostgresCategoryRepository;
use crate::data::repositories::postgres::comment_repository::PostgresCommentRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) post_service: Arc<PostService<PostgresPostRepository, PostgresCommentRepository>>,
    pub(crate) comment_service:
        Arc<CommentService<PostgresCommentRepository, PostgresPostRepository>>,
    pub(crate) category_service:
        Arc<CategoryService<PostgresCategoryRepository, PostgresPostRepository>>,
    pub(crate) profile_service: Arc<ProfileService<PostgresUserRepository, PostgresPostRepository>>,
    pub(crate) jwt: Arc<JwtService>,
    pub(crate) media_root: PathBuf,
}
