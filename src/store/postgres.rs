use async_trait::async_trait;
use sqlx::PgPool;

use super::Store;
use crate::error::StoreError;
use crate::posts::{
    self,
    repo_types::{NewPost, PostPatch, PostRow},
};
use crate::users::{
    self,
    repo_types::{NewUser, UserPatch, UserRow},
};

/// `Store` over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_users(&self) -> Result<Vec<UserRow>, StoreError> {
        users::repo::list(&self.db).await
    }

    async fn find_user(&self, id: i32) -> Result<Option<UserRow>, StoreError> {
        users::repo::find(&self.db, id).await
    }

    async fn find_users_by_ids(&self, ids: &[i32]) -> Result<Vec<UserRow>, StoreError> {
        users::repo::find_many(&self.db, ids).await
    }

    async fn insert_user(&self, new: NewUser) -> Result<UserRow, StoreError> {
        users::repo::insert(&self.db, &new).await
    }

    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<Option<UserRow>, StoreError> {
        users::repo::update(&self.db, id, &patch).await
    }

    async fn delete_user(&self, id: i32) -> Result<u64, StoreError> {
        users::repo::delete(&self.db, id).await
    }

    async fn list_posts(&self) -> Result<Vec<PostRow>, StoreError> {
        posts::repo::list(&self.db).await
    }

    async fn find_post(&self, id: i32) -> Result<Option<PostRow>, StoreError> {
        posts::repo::find(&self.db, id).await
    }

    async fn list_posts_by_author(&self, author_id: i32) -> Result<Vec<PostRow>, StoreError> {
        posts::repo::list_by_author(&self.db, author_id).await
    }

    async fn list_posts_by_authors(&self, author_ids: &[i32]) -> Result<Vec<PostRow>, StoreError> {
        posts::repo::list_by_authors(&self.db, author_ids).await
    }

    async fn insert_post(&self, new: NewPost) -> Result<PostRow, StoreError> {
        posts::repo::insert(&self.db, &new).await
    }

    async fn update_post(&self, id: i32, patch: PostPatch) -> Result<Option<PostRow>, StoreError> {
        posts::repo::update(&self.db, id, &patch).await
    }

    async fn delete_post(&self, id: i32) -> Result<u64, StoreError> {
        posts::repo::delete(&self.db, id).await
    }

    async fn delete_posts_by_author(&self, author_id: i32) -> Result<u64, StoreError> {
        posts::repo::delete_by_author(&self.db, author_id).await
    }
}
