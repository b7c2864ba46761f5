pub mod dto;
pub mod repo;
pub mod repo_types;
pub mod resolvers;

pub use dto::User;
pub use resolvers::{UserMutation, UserQuery};
