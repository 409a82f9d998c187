use axum::Router;
use axum::middleware;
use axum::routing::post;

use crate::presentation::AppState;
use crate::presentation::handlers::media::upload_post_image;
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/post_images", post(upload_post_image))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
