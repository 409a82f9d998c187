use axum::{Json, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct StaticPageDto {
    pub(crate) title: &'static str,
    pub(crate) text: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/pages/about",
    tag = "pages",
    responses(
        (status = 200, description = "About page", body = StaticPageDto)
    )
)]
pub(crate) async fn about() -> (StatusCode, Json<StaticPageDto>) {
    (
        StatusCode::OK,
        Json(StaticPageDto {
            title: "About",
            text: "A simple blog platform: write posts, schedule publications, \
                   sort them into categories and discuss them in comments.",
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/pages/rules",
    tag = "pages",
    responses(
        (status = 200, description = "Rules page", body = StaticPageDto)
    )
)]
pub(crate) async fn rules() -> (StatusCode, Json<StaticPageDto>) {
    (
        StatusCode::OK,
        Json(StaticPageDto {
            title: "Rules",
            text: "Be kind, stay on topic, and only publish content you have \
                   the rights to.",
        }),
    )
}
