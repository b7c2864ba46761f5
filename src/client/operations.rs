//! Client-side operation documents with their variable and result shapes.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// One GraphQL document together with the types that flow through it.
pub trait Operation {
    const NAME: &'static str;
    const DOCUMENT: &'static str;
    /// Cached queries a successful run of this operation makes stale.
    const INVALIDATES: &'static [&'static str] = &[];
    type Vars: Serialize + Send + Sync;
    type Data: DeserializeOwned + Send;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub posts: Vec<PostSummary>,
}

/// Author fields selected on a post; `createPost` only asks for id and name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthorRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithAuthor {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub created_at: String,
    pub author: AuthorRef,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NoVars {}

#[derive(Debug, Clone, Serialize)]
pub struct IdVars {
    pub id: String,
}

impl IdVars {
    pub fn new(id: impl ToString) -> Self {
        Self { id: id.to_string() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserVars {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostVars {
    pub title: String,
    pub content: Option<String>,
    pub author_id: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserVars {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePostVars {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
}

macro_rules! operation {
    ($ty:ident, $name:literal, $vars:ty, $data:ident { $field:ident : $out:ty }, [$($stale:ident),*], $doc:expr) => {
        pub struct $ty;

        #[derive(Debug, Clone, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $data {
            pub $field: $out,
        }

        impl Operation for $ty {
            const NAME: &'static str = $name;
            const DOCUMENT: &'static str = $doc;
            const INVALIDATES: &'static [&'static str] = &[$(<$stale as Operation>::NAME),*];
            type Vars = $vars;
            type Data = $data;
        }
    };
    ($ty:ident, $name:literal, $vars:ty, $data:ident { $field:ident : $out:ty }, $doc:expr) => {
        operation!($ty, $name, $vars, $data { $field: $out }, [], $doc);
    };
}

operation!(GetUsers, "GetUsers", NoVars, GetUsersData { users: Vec<UserSummary> }, r#"
query GetUsers {
  users {
    id
    name
    email
    createdAt
  }
}
"#);

operation!(GetUser, "GetUser", IdVars, GetUserData { user: Option<UserDetail> }, r#"
query GetUser($id: ID!) {
  user(id: $id) {
    id
    name
    email
    createdAt
    posts {
      id
      title
      content
      createdAt
    }
  }
}
"#);

operation!(GetPosts, "GetPosts", NoVars, GetPostsData { posts: Vec<PostWithAuthor> }, r#"
query GetPosts {
  posts {
    id
    title
    content
    createdAt
    author {
      id
      name
      email
    }
  }
}
"#);

operation!(GetPost, "GetPost", IdVars, GetPostData { post: Option<PostWithAuthor> }, r#"
query GetPost($id: ID!) {
  post(id: $id) {
    id
    title
    content
    createdAt
    author {
      id
      name
      email
    }
  }
}
"#);

operation!(CreateUser, "CreateUser", CreateUserVars, CreateUserData { create_user: UserSummary }, [GetUsers], r#"
mutation CreateUser($name: String!, $email: String!) {
  createUser(name: $name, email: $email) {
    id
    name
    email
    createdAt
  }
}
"#);

operation!(CreatePost, "CreatePost", CreatePostVars, CreatePostData { create_post: PostWithAuthor }, [GetPosts, GetUser], r#"
mutation CreatePost($title: String!, $content: String, $authorId: Int!) {
  createPost(title: $title, content: $content, authorId: $authorId) {
    id
    title
    content
    createdAt
    author {
      id
      name
    }
  }
}
"#);

operation!(UpdateUser, "UpdateUser", UpdateUserVars, UpdateUserData { update_user: UserSummary }, [GetUsers, GetUser, GetPosts, GetPost], r#"
mutation UpdateUser($id: ID!, $name: String, $email: String) {
  updateUser(id: $id, name: $name, email: $email) {
    id
    name
    email
    createdAt
  }
}
"#);

operation!(DeleteUser, "DeleteUser", IdVars, DeleteUserData { delete_user: bool }, [GetUsers, GetUser, GetPosts, GetPost], r#"
mutation DeleteUser($id: ID!) {
  deleteUser(id: $id)
}
"#);

operation!(UpdatePost, "UpdatePost", UpdatePostVars, UpdatePostData { update_post: PostSummary }, [GetPosts, GetPost, GetUser], r#"
mutation UpdatePost($id: ID!, $title: String!, $content: String) {
  updatePost(id: $id, title: $title, content: $content) {
    id
    title
    content
    createdAt
  }
}
"#);

operation!(DeletePost, "DeletePost", IdVars, DeletePostData { delete_post: bool }, [GetPosts, GetPost, GetUser], r#"
mutation DeletePost($id: ID!) {
  deletePost(id: $id)
}
"#);
