mod common;

use common::{create_post, create_user, error_code, exec, id_of, memory_schema};
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

const USERS: &str = "{ users { id name email createdAt } }";
const POSTS: &str = "{ posts { id title content authorId author { id name email } } }";

async fn users(schema: &mygraph::graphql::AppSchema) -> Vec<Value> {
    let res = exec(schema, USERS, json!({})).await;
    res["data"]["users"].as_array().cloned().unwrap_or_default()
}

async fn posts(schema: &mygraph::graphql::AppSchema) -> Vec<Value> {
    let res = exec(schema, POSTS, json!({})).await;
    res["data"]["posts"].as_array().cloned().unwrap_or_default()
}

#[tokio::test]
async fn created_user_is_listed_once_with_generated_fields() {
    let schema = memory_schema(false);
    let before = OffsetDateTime::now_utc();
    create_user(&schema, "Ada", "ada@example.com").await;

    let all = users(&schema).await;
    let matching: Vec<_> = all
        .iter()
        .filter(|u| u["name"] == "Ada" && u["email"] == "ada@example.com")
        .collect();
    assert_eq!(matching.len(), 1);

    let user = matching[0];
    assert!(id_of(user) > 0);
    let created = OffsetDateTime::parse(user["createdAt"].as_str().unwrap(), &Rfc3339).unwrap();
    assert!(created >= before, "{created} < {before}");
}

#[tokio::test]
async fn duplicate_email_is_rejected_and_leaves_users_unchanged() {
    let schema = memory_schema(false);
    create_user(&schema, "Ada", "ada@example.com").await;
    let before = users(&schema).await;

    let res = exec(
        &schema,
        r#"mutation { createUser(name: "Imposter", email: "ada@example.com") { id } }"#,
        json!({}),
    )
    .await;
    assert_eq!(error_code(&res), Some("UNIQUE_VIOLATION"));
    assert!(res["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("users_email_key"));
    assert_eq!(users(&schema).await, before);
}

#[tokio::test]
async fn post_round_trips_and_resolves_its_author() {
    let schema = memory_schema(false);
    let ada = create_user(&schema, "Ada", "ada@example.com").await;
    let post = create_post(&schema, id_of(&ada), "Notes", Some("on the engine")).await;
    assert_eq!(post["title"], "Notes");
    assert_eq!(post["content"], "on the engine");
    assert_eq!(post["authorId"].as_i64(), Some(id_of(&ada)));

    let res = exec(
        &schema,
        "query($id: ID!) { post(id: $id) { title content author { id name email } } }",
        json!({"id": post["id"]}),
    )
    .await;
    let fetched = &res["data"]["post"];
    assert_eq!(fetched["title"], "Notes");
    assert_eq!(fetched["content"], "on the engine");
    assert_eq!(fetched["author"]["id"], ada["id"]);
    assert_eq!(fetched["author"]["email"], "ada@example.com");
}

#[tokio::test]
async fn post_without_content_stores_null() {
    let schema = memory_schema(false);
    let ada = create_user(&schema, "Ada", "ada@example.com").await;
    let post = create_post(&schema, id_of(&ada), "Untitled thoughts", None).await;
    assert_eq!(post["content"], Value::Null);
}

#[tokio::test]
async fn post_for_missing_author_fails_without_writing() {
    let schema = memory_schema(false);
    let res = exec(
        &schema,
        r#"mutation { createPost(title: "orphan", authorId: 999) { id } }"#,
        json!({}),
    )
    .await;
    assert_eq!(error_code(&res), Some("FOREIGN_KEY_VIOLATION"));
    assert!(posts(&schema).await.is_empty());
}

#[tokio::test]
async fn update_with_only_email_keeps_name() {
    let schema = memory_schema(false);
    let ada = create_user(&schema, "Ada", "ada@example.com").await;

    let res = exec(
        &schema,
        "mutation($id: ID!, $email: String) { updateUser(id: $id, email: $email) { id name email } }",
        json!({"id": ada["id"], "email": "countess@example.com"}),
    )
    .await;
    let updated = &res["data"]["updateUser"];
    assert_eq!(updated["name"], "Ada");
    assert_eq!(updated["email"], "countess@example.com");
}

#[tokio::test]
async fn update_treats_empty_strings_as_absent() {
    let schema = memory_schema(false);
    let ada = create_user(&schema, "Ada", "ada@example.com").await;

    let res = exec(
        &schema,
        r#"mutation($id: ID!) { updateUser(id: $id, name: "", email: "") { name email } }"#,
        json!({"id": ada["id"]}),
    )
    .await;
    assert_eq!(res["data"]["updateUser"]["name"], "Ada");
    assert_eq!(res["data"]["updateUser"]["email"], "ada@example.com");
}

#[tokio::test]
async fn update_of_missing_user_reports_not_found() {
    let schema = memory_schema(false);
    let res = exec(
        &schema,
        r#"mutation { updateUser(id: "41", name: "ghost") { id } }"#,
        json!({}),
    )
    .await;
    assert_eq!(error_code(&res), Some("NOT_FOUND"));
    assert_eq!(res["errors"][0]["message"], "user 41 not found");
}

#[tokio::test]
async fn deleting_a_user_removes_their_posts() {
    let schema = memory_schema(false);
    let ada = create_user(&schema, "Ada", "ada@example.com").await;
    let bob = create_user(&schema, "Bob", "bob@example.com").await;
    for i in 0..3 {
        create_post(&schema, id_of(&ada), &format!("ada {i}"), None).await;
    }
    let kept = create_post(&schema, id_of(&bob), "bob's", None).await;

    let res = exec(
        &schema,
        "mutation($id: ID!) { deleteUser(id: $id) }",
        json!({"id": ada["id"]}),
    )
    .await;
    assert_eq!(res["data"]["deleteUser"], true);

    let res = exec(&schema, "query($id: ID!) { user(id: $id) { id } }", json!({"id": ada["id"]})).await;
    assert_eq!(res["data"]["user"], Value::Null);

    let remaining = posts(&schema).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], kept["id"]);
}

#[tokio::test]
async fn deleting_a_missing_user_still_returns_true() {
    let schema = memory_schema(false);
    let res = exec(&schema, r#"mutation { deleteUser(id: "123") }"#, json!({})).await;
    assert!(res.get("errors").is_none());
    assert_eq!(res["data"]["deleteUser"], true);
}

#[tokio::test]
async fn unknown_user_is_null_without_errors() {
    let schema = memory_schema(false);
    let res = exec(&schema, r#"{ user(id: "77") { id name } }"#, json!({})).await;
    assert!(res.get("errors").is_none(), "{res}");
    assert_eq!(res["data"]["user"], Value::Null);

    let res = exec(&schema, r#"{ post(id: "77") { id } }"#, json!({})).await;
    assert_eq!(res["data"]["post"], Value::Null);
}

#[tokio::test]
async fn non_numeric_id_is_bad_input() {
    let schema = memory_schema(false);
    let res = exec(&schema, r#"{ user(id: "abc") { id } }"#, json!({})).await;
    assert_eq!(error_code(&res), Some("BAD_USER_INPUT"));
    assert_eq!(res["errors"][0]["message"], "invalid id: abc");
}

#[tokio::test]
async fn update_and_delete_post() {
    let schema = memory_schema(false);
    let ada = create_user(&schema, "Ada", "ada@example.com").await;
    let post = create_post(&schema, id_of(&ada), "Draft", Some("rough")).await;

    let res = exec(
        &schema,
        "mutation($id: ID!) { updatePost(id: $id, title: \"Final\") { id title content } }",
        json!({"id": post["id"]}),
    )
    .await;
    assert_eq!(res["data"]["updatePost"]["title"], "Final");
    assert_eq!(res["data"]["updatePost"]["content"], Value::Null);

    let res = exec(&schema, "mutation($id: ID!) { deletePost(id: $id) }", json!({"id": post["id"]})).await;
    assert_eq!(res["data"]["deletePost"], true);
    assert!(posts(&schema).await.is_empty());

    let res = exec(
        &schema,
        "mutation($id: ID!) { updatePost(id: $id, title: \"again\") { id } }",
        json!({"id": post["id"]}),
    )
    .await;
    assert_eq!(error_code(&res), Some("NOT_FOUND"));
}

#[tokio::test]
async fn user_posts_lists_only_their_posts_in_order() {
    let schema = memory_schema(false);
    let ada = create_user(&schema, "Ada", "ada@example.com").await;
    let bob = create_user(&schema, "Bob", "bob@example.com").await;
    create_post(&schema, id_of(&ada), "first", None).await;
    create_post(&schema, id_of(&bob), "other", None).await;
    create_post(&schema, id_of(&ada), "second", None).await;

    let res = exec(
        &schema,
        "query($id: ID!) { user(id: $id) { posts { title } } }",
        json!({"id": ada["id"]}),
    )
    .await;
    let titles: Vec<_> = res["data"]["user"]["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["first", "second"]);
}

#[tokio::test]
async fn batched_relations_match_per_parent_lookups() {
    const NESTED: &str = "{ users { name posts { title author { name } } } posts { title author { email } } }";

    let mut results = Vec::new();
    for batch in [false, true] {
        let schema = memory_schema(batch);
        let ada = create_user(&schema, "Ada", "ada@example.com").await;
        let bob = create_user(&schema, "Bob", "bob@example.com").await;
        create_user(&schema, "Cy", "cy@example.com").await;
        create_post(&schema, id_of(&ada), "a1", None).await;
        create_post(&schema, id_of(&bob), "b1", None).await;
        create_post(&schema, id_of(&ada), "a2", Some("more")).await;

        let res = exec(&schema, NESTED, json!({})).await;
        assert!(res.get("errors").is_none(), "{res}");
        results.push(res["data"].clone());
    }
    assert_eq!(results[0], results[1]);
    assert_eq!(results[1]["users"][2]["posts"], json!([]));
}
