use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::policy::Authored;

pub(crate) const MAX_COMMENT_CHARS: usize = 550;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) text: String,
    pub(crate) post_id: i64,
    pub(crate) author_id: i64,
    pub(crate) author_username: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl Authored for Comment {
    fn author_id(&self) -> i64 {
        self.author_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommentTextRequest {
    pub(crate) text: String,
}

impl CommentTextRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            text: normalize_comment_text(&self.text)?,
        })
    }
}

fn normalize_comment_text(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if text.is_empty() || text.chars().count() > MAX_COMMENT_CHARS {
        return Err(DomainError::Validation {
            field: "text",
            message: "must be 1..550 chars",
        });
    }
    Ok(text.to_string())
}
