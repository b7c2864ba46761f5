use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Post record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PostRow {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub author_id: i32, // references users(id)
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub author_id: i32,
}

/// Replacement values for an existing post.
#[derive(Debug, Clone)]
pub struct PostPatch {
    pub title: String,
    pub content: Option<String>,
}
