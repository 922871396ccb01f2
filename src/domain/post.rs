//! Post domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Back-reference to the author; not checked against existing users
    pub author_id: Uuid,
    /// Ordered tags, may be empty
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Check whether the post carries exactly this tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Post creation input
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub tags: Vec<String>,
}

impl CreatePost {
    /// Build creation input; missing tags become an empty list.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: Uuid,
        tags: Option<Vec<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author_id,
            tags: tags.unwrap_or_default(),
        }
    }
}

/// Outcome of a delete operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResult {
    pub ok: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn from_count(deleted_count: u64) -> Self {
        Self {
            ok: deleted_count > 0,
            deleted_count,
        }
    }
}
