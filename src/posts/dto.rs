use async_graphql::{dataloader::DataLoader, Context, Object, Result, ID};
use time::format_description::well_known::Rfc3339;

use crate::error::{gql, ApiError};
use crate::graphql::loaders::UserLoader;
use crate::posts::repo_types::PostRow;
use crate::store::DynStore;
use crate::users::dto::User;

/// GraphQL `Post`.
#[derive(Debug, Clone)]
pub struct Post {
    row: PostRow,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self { row }
    }
}

#[Object]
impl Post {
    async fn id(&self) -> ID {
        ID(self.row.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.row.title
    }

    async fn content(&self) -> Option<&str> {
        self.row.content.as_deref()
    }

    async fn author_id(&self) -> i32 {
        self.row.author_id
    }

    async fn created_at(&self) -> Result<String> {
        Ok(self.row.created_at.format(&Rfc3339)?)
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        let author_id = self.row.author_id;
        let row = match ctx.data_opt::<DataLoader<UserLoader>>() {
            Some(loader) => loader.load_one(author_id).await?,
            None => ctx
                .data::<DynStore>()?
                .find_user(author_id)
                .await
                .map_err(gql)?,
        };
        // the foreign key guarantees the author exists at write time
        row.map(User::from).ok_or_else(|| {
            gql(ApiError::NotFound {
                entity: "user",
                id: author_id,
            })
        })
    }
}
