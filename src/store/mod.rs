mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::posts::repo_types::{NewPost, PostPatch, PostRow};
use crate::users::repo_types::{NewUser, UserPatch, UserRow};

/// Shared handle stored in the GraphQL schema data.
pub type DynStore = Arc<dyn Store>;

/// Data access for users and posts.
///
/// Every method is a single statement against the store; nothing here spans
/// statements, so callers that chain calls get no atomicity across them.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRow>, StoreError>;
    async fn find_user(&self, id: i32) -> Result<Option<UserRow>, StoreError>;
    async fn find_users_by_ids(&self, ids: &[i32]) -> Result<Vec<UserRow>, StoreError>;
    async fn insert_user(&self, new: NewUser) -> Result<UserRow, StoreError>;
    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<Option<UserRow>, StoreError>;
    async fn delete_user(&self, id: i32) -> Result<u64, StoreError>;

    async fn list_posts(&self) -> Result<Vec<PostRow>, StoreError>;
    async fn find_post(&self, id: i32) -> Result<Option<PostRow>, StoreError>;
    async fn list_posts_by_author(&self, author_id: i32) -> Result<Vec<PostRow>, StoreError>;
    async fn list_posts_by_authors(&self, author_ids: &[i32]) -> Result<Vec<PostRow>, StoreError>;
    async fn insert_post(&self, new: NewPost) -> Result<PostRow, StoreError>;
    async fn update_post(&self, id: i32, patch: PostPatch) -> Result<Option<PostRow>, StoreError>;
    async fn delete_post(&self, id: i32) -> Result<u64, StoreError>;
    async fn delete_posts_by_author(&self, author_id: i32) -> Result<u64, StoreError>;
}
