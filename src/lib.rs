//! GraphQL CRUD service for users and their posts, plus a typed client and
//! terminal UI that talk to it.

pub mod app;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod logging;
pub mod posts;
pub mod state;
pub mod store;
pub mod ui;
pub mod users;

pub use app::{build_app, serve};
pub use state::AppState;
