use async_graphql::{Context, Object, Result, ID};
use tracing::info;

use crate::error::{gql, ApiError};
use crate::graphql::parse_id;
use crate::posts::dto::Post;
use crate::posts::repo_types::{NewPost, PostPatch};
use crate::store::DynStore;

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let rows = ctx.data::<DynStore>()?.list_posts().await.map_err(gql)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Post>> {
        let id = parse_id(&id).map_err(gql)?;
        let row = ctx.data::<DynStore>()?.find_post(id).await.map_err(gql)?;
        Ok(row.map(Post::from))
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: Option<String>,
        author_id: i32,
    ) -> Result<Post> {
        let row = ctx
            .data::<DynStore>()?
            .insert_post(NewPost {
                title,
                content,
                author_id,
            })
            .await
            .map_err(gql)?;
        info!(post_id = row.id, author_id, "post created");
        Ok(row.into())
    }

    /// Replaces title and content; a null `content` clears it.
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: String,
        content: Option<String>,
    ) -> Result<Post> {
        let id = parse_id(&id).map_err(gql)?;
        let row = ctx
            .data::<DynStore>()?
            .update_post(id, PostPatch { title, content })
            .await
            .map_err(gql)?
            .ok_or_else(|| gql(ApiError::NotFound { entity: "post", id }))?;
        info!(post_id = row.id, "post updated");
        Ok(row.into())
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let id = parse_id(&id).map_err(gql)?;
        let deleted = ctx.data::<DynStore>()?.delete_post(id).await.map_err(gql)?;
        info!(post_id = id, deleted, "post deleted");
        Ok(true)
    }
}
