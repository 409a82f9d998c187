use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::policy::Authored;
use super::published::Published;

/// Category state a post needs for visibility decisions. Absent when the
/// category was deleted (FK nulled).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CategoryRef {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) slug: String,
    pub(crate) is_published: bool,
}

/// Place label attached to a post; only carried while the location itself
/// is published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LocationRef {
    pub(crate) id: i64,
    pub(crate) name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) image: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) author_id: i64,
    pub(crate) author_username: String,
    pub(crate) location: Option<LocationRef>,
    pub(crate) category: Option<CategoryRef>,
    pub(crate) published: Published,
}

impl Authored for Post {
    fn author_id(&self) -> i64 {
        self.author_id
    }
}

/// Post annotated with its comment count, as returned by listings.
#[derive(Debug, Clone)]
pub(crate) struct PostSummary {
    pub(crate) post: Post,
    pub(crate) comment_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) image: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) is_published: bool,
    pub(crate) location_id: Option<i64>,
    pub(crate) category_id: Option<i64>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            text: normalize_text(&self.text)?,
            image: normalize_image(&self.image)?,
            ..self
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) image: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) is_published: bool,
    pub(crate) location_id: Option<i64>,
    pub(crate) category_id: Option<i64>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            text: normalize_text(&self.text)?,
            image: normalize_image(&self.image)?,
            ..self
        })
    }
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..256 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_text(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::Validation {
            field: "text",
            message: "must not be empty",
        });
    }
    Ok(text.to_string())
}

fn normalize_image(image: &str) -> Result<String, DomainError> {
    let image = image.trim();
    if image.is_empty() {
        return Err(DomainError::Validation {
            field: "image",
            message: "must reference an uploaded image",
        });
    }
    Ok(image.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{CreatePostRequest, UpdatePostRequest};
    use crate::domain::error::DomainError;

    fn create_request() -> CreatePostRequest {
        CreatePostRequest {
            title: "  Title  ".to_string(),
            text: "  some text  ".to_string(),
            image: " post_images/cat.png ".to_string(),
            pub_date: Utc::now(),
            is_published: true,
            location_id: None,
            category_id: Some(1),
        }
    }

    #[test]
    fn create_request_normalizes_fields() {
        let validated = create_request().validate().expect("must validate");
        assert_eq!(validated.title, "Title");
        assert_eq!(validated.text, "some text");
        assert_eq!(validated.image, "post_images/cat.png");
    }

    #[test]
    fn create_request_rejects_overlong_title() {
        let mut req = create_request();
        req.title = "x".repeat(257);
        let err = req.validate().expect_err("title must be rejected");
        assert!(matches!(
            err,
            DomainError::Validation { field: "title", .. }
        ));
    }

    #[test]
    fn create_request_requires_image() {
        let mut req = create_request();
        req.image = "   ".to_string();
        let err = req.validate().expect_err("image must be required");
        assert!(matches!(
            err,
            DomainError::Validation { field: "image", .. }
        ));
    }

    #[test]
    fn update_request_rejects_empty_text() {
        let req = UpdatePostRequest {
            title: "Title".to_string(),
            text: "   ".to_string(),
            image: "post_images/cat.png".to_string(),
            pub_date: Utc::now(),
            is_published: true,
            location_id: None,
            category_id: None,
        };
        let err = req.validate().expect_err("text must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "text", .. }));
    }
}
