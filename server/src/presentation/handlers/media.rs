use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::middleware::auth::AuthenticatedUser;

const POST_IMAGES_DIR: &str = "post_images";
const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UploadedImageDto {
    /// Path to reference from a post's `image` field, relative to `/media`.
    pub(crate) image: String,
}

#[utoipa::path(
    post,
    path = "/api/media/post_images",
    tag = "media",
    security(
        ("bearer_auth" = [])
    ),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = UploadedImageDto),
        (status = 400, description = "Missing 'image' field or unsupported file type"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn upload_post_image(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadedImageDto>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid multipart body: {err}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let extension = field
            .file_name()
            .and_then(file_extension)
            .ok_or_else(|| AppError::BadRequest("image file name is required".to_string()))?;
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::BadRequest(format!(
                "unsupported image type: {extension}"
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("failed to read image: {err}")))?;
        if data.is_empty() {
            return Err(AppError::BadRequest("image must not be empty".to_string()));
        }

        let stored_name = format!(
            "{}_{}.{extension}",
            auth.user_id,
            Utc::now().timestamp_micros()
        );
        let dir = state.media_root.join(POST_IMAGES_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|err| AppError::Internal(err.into()))?;
        tokio::fs::write(dir.join(&stored_name), &data)
            .await
            .map_err(|err| AppError::Internal(err.into()))?;

        let image = format!("{POST_IMAGES_DIR}/{stored_name}");
        debug!(user_id = auth.user_id, %image, bytes = data.len(), "stored post image");
        return Ok((StatusCode::CREATED, Json(UploadedImageDto { image })));
    }

    Err(AppError::BadRequest(
        "multipart field 'image' is required".to_string(),
    ))
}

fn file_extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::{ALLOWED_EXTENSIONS, file_extension};

    #[test]
    fn extension_is_extracted_case_insensitively() {
        assert_eq!(file_extension("cat.PNG").as_deref(), Some("png"));
        assert_eq!(file_extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(file_extension("noext"), None);
    }

    #[test]
    fn jpeg_variants_are_allowed() {
        assert!(ALLOWED_EXTENSIONS.contains(&"jpg"));
        assert!(ALLOWED_EXTENSIONS.contains(&"jpeg"));
        assert!(!ALLOWED_EXTENSIONS.contains(&"svg"));
    }
}
