pub mod dto;
pub mod repo;
pub mod repo_types;
pub mod resolvers;

pub use dto::Post;
pub use resolvers::{PostMutation, PostQuery};
