//! Batched relation lookups, enabled with `GRAPHQL_BATCH_RELATIONS`.
//!
//! Loaders only coalesce sibling lookups issued while one request resolves;
//! no values are cached between requests.
use std::collections::HashMap;

use async_graphql::dataloader::Loader;

use crate::error::gql;
use crate::posts::repo_types::PostRow;
use crate::store::DynStore;
use crate::users::repo_types::UserRow;

/// Loads `Post.author` by user id.
pub struct UserLoader {
    store: DynStore,
}

impl UserLoader {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }
}

impl Loader<i32> for UserLoader {
    type Value = UserRow;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        tracing::debug!(keys = keys.len(), "batch load users");
        let rows = self.store.find_users_by_ids(keys).await.map_err(gql)?;
        Ok(rows.into_iter().map(|u| (u.id, u)).collect())
    }
}

/// Loads `User.posts` by author id.
pub struct PostsByAuthorLoader {
    store: DynStore,
}

impl PostsByAuthorLoader {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }
}

impl Loader<i32> for PostsByAuthorLoader {
    type Value = Vec<PostRow>;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        tracing::debug!(keys = keys.len(), "batch load posts by author");
        let rows = self.store.list_posts_by_authors(keys).await.map_err(gql)?;
        let mut map: HashMap<i32, Self::Value> = HashMap::new();
        for post in rows {
            map.entry(post.author_id).or_default().push(post);
        }
        Ok(map)
    }
}
