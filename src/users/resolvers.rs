use async_graphql::{Context, Object, Result, ID};
use tracing::info;

use crate::error::{gql, ApiError};
use crate::graphql::parse_id;
use crate::store::DynStore;
use crate::users::dto::User;
use crate::users::repo_types::{NewUser, UserPatch};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let rows = ctx.data::<DynStore>()?.list_users().await.map_err(gql)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    /// `null` when no user has this id.
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        let id = parse_id(&id).map_err(gql)?;
        let row = ctx.data::<DynStore>()?.find_user(id).await.map_err(gql)?;
        Ok(row.map(User::from))
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn create_user(&self, ctx: &Context<'_>, name: String, email: String) -> Result<User> {
        let row = ctx
            .data::<DynStore>()?
            .insert_user(NewUser { name, email })
            .await
            .map_err(gql)?;
        info!(user_id = row.id, email = %row.email, "user created");
        Ok(row.into())
    }

    /// Empty strings count as "not supplied" and leave the column as is.
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User> {
        let id = parse_id(&id).map_err(gql)?;
        let patch = UserPatch {
            name: name.filter(|s| !s.is_empty()),
            email: email.filter(|s| !s.is_empty()),
        };
        let row = ctx
            .data::<DynStore>()?
            .update_user(id, patch)
            .await
            .map_err(gql)?
            .ok_or_else(|| gql(ApiError::NotFound { entity: "user", id }))?;
        info!(user_id = row.id, "user updated");
        Ok(row.into())
    }

    /// Removes the user's posts, then the user. The two deletes are separate
    /// statements; a failure in between leaves the posts gone and the user in
    /// place. Returns `true` even when the user did not exist.
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let id = parse_id(&id).map_err(gql)?;
        let store = ctx.data::<DynStore>()?;
        let posts = store.delete_posts_by_author(id).await.map_err(gql)?;
        let users = store.delete_user(id).await.map_err(gql)?;
        info!(user_id = id, posts, users, "user deleted");
        Ok(true)
    }
}
