//! Plain-text renderings of query results.

use std::fmt::Write as _;

use time::{format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime};

use crate::client::operations::{PostWithAuthor, UserDetail, UserSummary};

/// What a view shows while its query is in flight or after it settles.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> QueryState<T> {
    pub fn from_result<E: std::fmt::Display>(res: Result<T, E>) -> Self {
        match res {
            Ok(v) => QueryState::Ready(v),
            Err(e) => QueryState::Error(e.to_string()),
        }
    }
}

/// `2024-05-01 13:45 UTC`, or the raw value when it is not RFC 3339.
pub fn format_timestamp(raw: &str) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute] UTC");
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|t| t.to_offset(time::UtcOffset::UTC).format(&fmt).ok())
        .unwrap_or_else(|| raw.to_string())
}

/// Users board, newest first.
pub fn user_list(state: &QueryState<Vec<UserSummary>>) -> String {
    let users = match state {
        QueryState::Loading => return "Loading users...".into(),
        QueryState::Error(e) => return format!("Error loading users: {e}"),
        QueryState::Ready(users) => users,
    };
    let mut out = String::from("Users\n");
    if users.is_empty() {
        out.push_str("  (none yet)\n");
    }
    for user in users.iter().rev() {
        let _ = writeln!(
            out,
            "  [{}] {} <{}>  created {}",
            user.id,
            user.name,
            user.email,
            format_timestamp(&user.created_at)
        );
    }
    out
}

/// One user with the posts they wrote.
pub fn user_detail(id: &str, state: &QueryState<Option<UserDetail>>) -> String {
    let user = match state {
        QueryState::Loading => return "Loading posts...".into(),
        QueryState::Error(e) => return format!("Error loading posts: {e}"),
        QueryState::Ready(None) => return format!("User {id} not found."),
        QueryState::Ready(Some(user)) => user,
    };
    let mut out = String::new();
    let _ = writeln!(out, "{} <{}>", user.name, user.email);
    let _ = writeln!(out, "Created: {}", format_timestamp(&user.created_at));
    let _ = writeln!(out, "\nPosts by {}", user.name);
    if user.posts.is_empty() {
        out.push_str("  No posts found for this user.\n");
    }
    for post in &user.posts {
        let _ = writeln!(out, "  [{}] {}", post.id, post.title);
        if let Some(content) = post.content.as_deref().filter(|c| !c.is_empty()) {
            let _ = writeln!(out, "      {content}");
        }
        let _ = writeln!(out, "      Created: {}", format_timestamp(&post.created_at));
    }
    out
}

fn post_block(out: &mut String, post: &PostWithAuthor) {
    let _ = writeln!(out, "  [{}] {}", post.id, post.title);
    if let Some(content) = post.content.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "      {content}");
    }
    match &post.author.email {
        Some(email) => {
            let _ = writeln!(out, "      Author: {} ({})", post.author.name, email);
        }
        None => {
            let _ = writeln!(out, "      Author: {}", post.author.name);
        }
    }
    let _ = writeln!(out, "      Created: {}", format_timestamp(&post.created_at));
}

pub fn post_list(state: &QueryState<Vec<PostWithAuthor>>) -> String {
    let posts = match state {
        QueryState::Loading => return "Loading posts...".into(),
        QueryState::Error(e) => return format!("Error loading posts: {e}"),
        QueryState::Ready(posts) => posts,
    };
    let mut out = String::from("Posts\n");
    if posts.is_empty() {
        out.push_str("  (none yet)\n");
    }
    for post in posts {
        post_block(&mut out, post);
    }
    out
}

pub fn post_detail(id: &str, state: &QueryState<Option<PostWithAuthor>>) -> String {
    match state {
        QueryState::Loading => "Loading post...".into(),
        QueryState::Error(e) => format!("Error loading post: {e}"),
        QueryState::Ready(None) => format!("Post {id} not found."),
        QueryState::Ready(Some(post)) => {
            let mut out = String::new();
            post_block(&mut out, post);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::operations::{AuthorRef, PostSummary};

    fn user(id: &str, name: &str) -> UserSummary {
        UserSummary {
            id: id.into(),
            name: name.into(),
            email: format!("{name}@x.io"),
            created_at: "2024-05-01T13:45:10Z".into(),
        }
    }

    #[test]
    fn timestamps_render_in_utc() {
        assert_eq!(format_timestamp("2024-05-01T15:45:10+02:00"), "2024-05-01 13:45 UTC");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn user_list_shows_newest_first() {
        let out = user_list(&QueryState::Ready(vec![user("1", "ada"), user("2", "bob")]));
        let ada = out.find("ada").unwrap();
        let bob = out.find("bob").unwrap();
        assert!(bob < ada);
    }

    #[test]
    fn loading_and_error_states_are_plain_text() {
        assert_eq!(user_list(&QueryState::Loading), "Loading users...");
        assert_eq!(
            user_list(&QueryState::Error("boom".into())),
            "Error loading users: boom"
        );
        assert_eq!(
            post_list(&QueryState::Error("boom".into())),
            "Error loading posts: boom"
        );
    }

    #[test]
    fn user_without_posts_says_so() {
        let detail = UserDetail {
            id: "1".into(),
            name: "ada".into(),
            email: "ada@x.io".into(),
            created_at: "2024-05-01T13:45:10Z".into(),
            posts: vec![],
        };
        let out = user_detail("1", &QueryState::Ready(Some(detail.clone())));
        assert!(out.contains("Posts by ada"));
        assert!(out.contains("No posts found for this user."));

        let with_post = UserDetail {
            posts: vec![PostSummary {
                id: "9".into(),
                title: "Hello".into(),
                content: Some("body".into()),
                created_at: "2024-05-01T13:45:10Z".into(),
            }],
            ..detail
        };
        let out = user_detail("1", &QueryState::Ready(Some(with_post)));
        assert!(out.contains("[9] Hello"));
        assert!(!out.contains("No posts found"));
        assert_eq!(user_detail("5", &QueryState::Ready(None)), "User 5 not found.");
    }

    #[test]
    fn post_list_names_the_author() {
        let post = PostWithAuthor {
            id: "3".into(),
            title: "T".into(),
            content: None,
            created_at: "2024-05-01T13:45:10Z".into(),
            author: AuthorRef {
                id: "1".into(),
                name: "ada".into(),
                email: Some("ada@x.io".into()),
            },
        };
        let out = post_list(&QueryState::Ready(vec![post]));
        assert!(out.contains("Author: ada (ada@x.io)"));
    }
}
