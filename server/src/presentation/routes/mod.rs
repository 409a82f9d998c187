use axum::Router;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod media;
pub(crate) mod pages;
pub(crate) mod posts;
pub(crate) mod profiles;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/posts", posts::router(state.clone()))
        .nest("/api/categories", categories::router())
        .nest("/api/profiles", profiles::router(state.clone()))
        .nest("/api/media", media::router(state))
        .nest("/api/pages", pages::router())
}
