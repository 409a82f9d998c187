use serde::{Deserialize, Serialize};

use super::published::Published;

/// Grouping label for posts; shared reference data, never user-owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Category {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) slug: String,
    pub(crate) published: Published,
}
