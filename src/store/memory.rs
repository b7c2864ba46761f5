use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use super::Store;
use crate::error::StoreError;
use crate::posts::repo_types::{NewPost, PostPatch, PostRow};
use crate::users::repo_types::{NewUser, UserPatch, UserRow};

const USERS_EMAIL_KEY: &str = r#"duplicate key value violates unique constraint "users_email_key""#;
const POSTS_AUTHOR_FK_INSERT: &str =
    r#"insert or update on table "posts" violates foreign key constraint "posts_author_id_fkey""#;
const POSTS_AUTHOR_FK_DELETE: &str = r#"update or delete on table "users" violates foreign key constraint "posts_author_id_fkey" on table "posts""#;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, UserRow>,
    posts: BTreeMap<i32, PostRow>,
    user_seq: i32,
    post_seq: i32,
}

/// Process-local `Store` with the same constraints as the SQL schema.
///
/// Each call holds the lock for its whole body, so a single call behaves like
/// one statement. Sequences are never rewound, like `SERIAL`.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // a poisoned lock only means another caller panicked mid-statement
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_users(&self) -> Result<Vec<UserRow>, StoreError> {
        Ok(self.lock().users.values().cloned().collect())
    }

    async fn find_user(&self, id: i32) -> Result<Option<UserRow>, StoreError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn find_users_by_ids(&self, ids: &[i32]) -> Result<Vec<UserRow>, StoreError> {
        let t = self.lock();
        Ok(t.users
            .values()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn insert_user(&self, new: NewUser) -> Result<UserRow, StoreError> {
        let mut t = self.lock();
        if t.email_taken(&new.email, None) {
            return Err(StoreError::UniqueViolation(USERS_EMAIL_KEY.into()));
        }
        t.user_seq += 1;
        let row = UserRow {
            id: t.user_seq,
            name: new.name,
            email: new.email,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<Option<UserRow>, StoreError> {
        let mut t = self.lock();
        if let Some(email) = &patch.email {
            if t.users.contains_key(&id) && t.email_taken(email, Some(id)) {
                return Err(StoreError::UniqueViolation(USERS_EMAIL_KEY.into()));
            }
        }
        let Some(row) = t.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(email) = patch.email {
            row.email = email;
        }
        Ok(Some(row.clone()))
    }

    async fn delete_user(&self, id: i32) -> Result<u64, StoreError> {
        let mut t = self.lock();
        if t.posts.values().any(|p| p.author_id == id) {
            return Err(StoreError::ForeignKeyViolation(POSTS_AUTHOR_FK_DELETE.into()));
        }
        Ok(t.users.remove(&id).map_or(0, |_| 1))
    }

    async fn list_posts(&self) -> Result<Vec<PostRow>, StoreError> {
        Ok(self.lock().posts.values().cloned().collect())
    }

    async fn find_post(&self, id: i32) -> Result<Option<PostRow>, StoreError> {
        Ok(self.lock().posts.get(&id).cloned())
    }

    async fn list_posts_by_author(&self, author_id: i32) -> Result<Vec<PostRow>, StoreError> {
        self.list_posts_by_authors(&[author_id]).await
    }

    async fn list_posts_by_authors(&self, author_ids: &[i32]) -> Result<Vec<PostRow>, StoreError> {
        let t = self.lock();
        Ok(t.posts
            .values()
            .filter(|p| author_ids.contains(&p.author_id))
            .cloned()
            .collect())
    }

    async fn insert_post(&self, new: NewPost) -> Result<PostRow, StoreError> {
        let mut t = self.lock();
        if !t.users.contains_key(&new.author_id) {
            return Err(StoreError::ForeignKeyViolation(POSTS_AUTHOR_FK_INSERT.into()));
        }
        t.post_seq += 1;
        let row = PostRow {
            id: t.post_seq,
            title: new.title,
            content: new.content,
            author_id: new.author_id,
            created_at: OffsetDateTime::now_utc(),
        };
        t.posts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_post(&self, id: i32, patch: PostPatch) -> Result<Option<PostRow>, StoreError> {
        let mut t = self.lock();
        let Some(row) = t.posts.get_mut(&id) else {
            return Ok(None);
        };
        row.title = patch.title;
        row.content = patch.content;
        Ok(Some(row.clone()))
    }

    async fn delete_post(&self, id: i32) -> Result<u64, StoreError> {
        Ok(self.lock().posts.remove(&id).map_or(0, |_| 1))
    }

    async fn delete_posts_by_author(&self, author_id: i32) -> Result<u64, StoreError> {
        let mut t = self.lock();
        let before = t.posts.len();
        t.posts.retain(|_, p| p.author_id != author_id);
        Ok((before - t.posts.len()) as u64)
    }
}
