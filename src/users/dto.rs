use async_graphql::{dataloader::DataLoader, Context, Object, Result, ID};
use time::format_description::well_known::Rfc3339;

use crate::error::gql;
use crate::graphql::loaders::PostsByAuthorLoader;
use crate::posts::dto::Post;
use crate::store::DynStore;
use crate::users::repo_types::UserRow;

/// GraphQL `User`.
#[derive(Debug, Clone)]
pub struct User {
    row: UserRow,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self { row }
    }
}

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID(self.row.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.row.name
    }

    async fn email(&self) -> &str {
        &self.row.email
    }

    /// RFC 3339 timestamp.
    async fn created_at(&self) -> Result<String> {
        Ok(self.row.created_at.format(&Rfc3339)?)
    }

    /// Posts written by this user, oldest first.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let rows = match ctx.data_opt::<DataLoader<PostsByAuthorLoader>>() {
            Some(loader) => loader.load_one(self.row.id).await?.unwrap_or_default(),
            None => ctx
                .data::<DynStore>()?
                .list_posts_by_author(self.row.id)
                .await
                .map_err(gql)?,
        };
        Ok(rows.into_iter().map(Post::from).collect())
    }
}
