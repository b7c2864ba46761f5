pub mod handlers;
pub mod loaders;
pub mod schema;

pub use schema::{build_schema, AppSchema, Mutation, Query};

use async_graphql::ID;

use crate::error::ApiError;

/// GraphQL `ID`s carry the integer primary key as a string.
pub(crate) fn parse_id(id: &ID) -> Result<i32, ApiError> {
    id.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::InvalidId(id.to_string()))
}
