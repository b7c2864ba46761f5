use tracing::{info, warn};

use crate::client::operations::{
    CreatePost, CreatePostVars, CreateUser, CreateUserVars, DeletePost, DeleteUser, GetPost,
    GetPosts, GetUser, GetUsers, IdVars, NoVars, UpdatePost, UpdatePostVars, UpdateUser,
    UpdateUserVars, UserSummary,
};
use crate::client::{ApiClient, ClientError};
use crate::ui::views::{self, QueryState};
use crate::ui::Console;

/// How a user action ended. Failures have already been shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Cancelled,
    Invalid(String),
    Failed(String),
}

/// Views and actions over one client and one console.
pub struct Board<'a> {
    client: &'a mut ApiClient,
    console: &'a mut dyn Console,
}

impl<'a> Board<'a> {
    pub fn new(client: &'a mut ApiClient, console: &'a mut dyn Console) -> Self {
        Self { client, console }
    }

    fn invalid(&mut self, msg: &str) -> Outcome {
        self.console.alert(msg);
        Outcome::Invalid(msg.to_string())
    }

    fn failed(&mut self, what: &str, err: ClientError) -> Outcome {
        warn!(error = %err, what, "action failed");
        let msg = format!("Error {what}: {err}");
        self.console.alert(&msg);
        Outcome::Failed(msg)
    }

    pub async fn show_users(&mut self) -> QueryState<()> {
        self.console.show(&views::user_list(&QueryState::Loading));
        let state = QueryState::from_result(self.client.query::<GetUsers>(&NoVars {}).await.map(|d| d.users));
        self.render_users(state)
    }

    async fn refetch_users(&mut self) -> QueryState<()> {
        let state = QueryState::from_result(self.client.refetch::<GetUsers>(&NoVars {}).await.map(|d| d.users));
        self.render_users(state)
    }

    fn render_users(&mut self, state: QueryState<Vec<UserSummary>>) -> QueryState<()> {
        self.console.show(&views::user_list(&state));
        settle(state)
    }

    pub async fn show_user(&mut self, id: &str) -> QueryState<()> {
        self.console.show(&views::user_detail(id, &QueryState::Loading));
        let state = QueryState::from_result(self.client.query::<GetUser>(&IdVars::new(id)).await.map(|d| d.user));
        self.console.show(&views::user_detail(id, &state));
        settle(state)
    }

    async fn refetch_user(&mut self, id: &str) -> QueryState<()> {
        let state = QueryState::from_result(self.client.refetch::<GetUser>(&IdVars::new(id)).await.map(|d| d.user));
        self.console.show(&views::user_detail(id, &state));
        settle(state)
    }

    pub async fn show_posts(&mut self) -> QueryState<()> {
        self.console.show(&views::post_list(&QueryState::Loading));
        let state = QueryState::from_result(self.client.query::<GetPosts>(&NoVars {}).await.map(|d| d.posts));
        self.console.show(&views::post_list(&state));
        settle(state)
    }

    pub async fn show_post(&mut self, id: &str) -> QueryState<()> {
        self.console.show(&views::post_detail(id, &QueryState::Loading));
        let state = QueryState::from_result(self.client.query::<GetPost>(&IdVars::new(id)).await.map(|d| d.post));
        self.console.show(&views::post_detail(id, &state));
        settle(state)
    }

    pub async fn create_user(&mut self, name: &str, email: &str) -> Outcome {
        if name.is_empty() || email.is_empty() {
            return self.invalid("Please fill all fields.");
        }
        let vars = CreateUserVars {
            name: name.into(),
            email: email.into(),
        };
        match self.client.mutate::<CreateUser>(&vars).await {
            Ok(data) => {
                info!(user_id = %data.create_user.id, "user created");
                self.refetch_users().await;
                Outcome::Done
            }
            Err(e) => self.failed("creating user", e),
        }
    }

    /// Fields left as `None` keep their current value, as an edit form
    /// prefilled with the user would.
    pub async fn update_user(&mut self, id: &str, name: Option<&str>, email: Option<&str>) -> Outcome {
        let current = match self.client.query::<GetUser>(&IdVars::new(id)).await {
            Ok(data) => data.user,
            Err(e) => return self.failed("loading user", e),
        };
        let Some(current) = current else {
            return self.invalid(&format!("User {id} not found."));
        };
        let name = name.unwrap_or(current.name.as_str()).to_string();
        let email = email.unwrap_or(current.email.as_str()).to_string();
        if name.is_empty() || email.is_empty() {
            return self.invalid("Please fill all fields.");
        }
        let vars = UpdateUserVars {
            id: id.into(),
            name: Some(name),
            email: Some(email),
        };
        match self.client.mutate::<UpdateUser>(&vars).await {
            Ok(_) => {
                self.refetch_users().await;
                Outcome::Done
            }
            Err(e) => self.failed("updating user", e),
        }
    }

    pub async fn delete_user(&mut self, id: &str) -> Outcome {
        if !self.console.confirm("Are you sure you want to delete this user?") {
            return Outcome::Cancelled;
        }
        match self.client.mutate::<DeleteUser>(&IdVars::new(id)).await {
            Ok(_) => {
                self.console.alert("User deleted successfully");
                self.refetch_users().await;
                Outcome::Done
            }
            Err(e) => self.failed("deleting user", e),
        }
    }

    pub async fn create_post(&mut self, author_id: &str, title: &str, content: Option<&str>) -> Outcome {
        if title.is_empty() {
            return self.invalid("Title is required.");
        }
        let Ok(author) = author_id.trim().parse::<i32>() else {
            return self.invalid("No user selected.");
        };
        let vars = CreatePostVars {
            title: title.into(),
            content: content.map(str::to_string),
            author_id: author,
        };
        match self.client.mutate::<CreatePost>(&vars).await {
            Ok(_) => {
                self.refetch_user(author_id).await;
                Outcome::Done
            }
            Err(e) => self.failed("creating post", e),
        }
    }

    pub async fn update_post(&mut self, id: &str, title: Option<&str>, content: Option<&str>) -> Outcome {
        let current = match self.client.query::<GetPost>(&IdVars::new(id)).await {
            Ok(data) => data.post,
            Err(e) => return self.failed("loading post", e),
        };
        let Some(current) = current else {
            return self.invalid(&format!("Post {id} not found."));
        };
        let title = title.unwrap_or(current.title.as_str()).to_string();
        if title.is_empty() {
            return self.invalid("Title is required.");
        }
        let content = content.map(str::to_string).or(current.content);
        let vars = UpdatePostVars {
            id: id.into(),
            title,
            content,
        };
        match self.client.mutate::<UpdatePost>(&vars).await {
            Ok(_) => {
                self.refetch_user(&current.author.id).await;
                Outcome::Done
            }
            Err(e) => self.failed("updating post", e),
        }
    }

    pub async fn delete_post(&mut self, id: &str) -> Outcome {
        if !self.console.confirm("Are you sure you want to delete this post?") {
            return Outcome::Cancelled;
        }
        // remember the author so their detail view can be refreshed
        let author = match self.client.query::<GetPost>(&IdVars::new(id)).await {
            Ok(data) => data.post.map(|p| p.author.id),
            Err(e) => {
                warn!(error = %e, post_id = id, "post lookup before delete failed");
                None
            }
        };
        match self.client.mutate::<DeletePost>(&IdVars::new(id)).await {
            Ok(_) => {
                self.console.alert("Post deleted successfully");
                if let Some(author) = author {
                    self.refetch_user(&author).await;
                }
                Outcome::Done
            }
            Err(e) => self.failed("deleting post", e),
        }
    }
}

fn settle<T>(state: QueryState<T>) -> QueryState<()> {
    match state {
        QueryState::Loading => QueryState::Loading,
        QueryState::Error(e) => QueryState::Error(e),
        QueryState::Ready(_) => QueryState::Ready(()),
    }
}
