use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shared publication state embedded in Category and Post.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct Published {
    pub(crate) is_published: bool,
    pub(crate) created_at: DateTime<Utc>,
}

impl Published {
    pub(crate) fn new(is_published: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            is_published,
            created_at,
        }
    }
}
