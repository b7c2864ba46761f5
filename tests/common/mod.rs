#![allow(dead_code)]

use std::sync::Arc;

use async_graphql::{Request, Variables};
use async_trait::async_trait;
use mygraph::client::{ClientError, GraphQlRequest, GraphQlResponse, Transport};
use mygraph::graphql::{build_schema, AppSchema};
use mygraph::store::MemoryStore;
use serde_json::{json, Value};

pub fn memory_schema(batch_relations: bool) -> AppSchema {
    build_schema(Arc::new(MemoryStore::new()), batch_relations)
}

/// Execute a document and return the response as JSON (`data`, `errors`).
pub async fn exec(schema: &AppSchema, query: &str, vars: Value) -> Value {
    let req = Request::new(query).variables(Variables::from_json(vars));
    let res = schema.execute(req).await;
    serde_json::to_value(&res).expect("response serializes")
}

pub fn error_code(res: &Value) -> Option<&str> {
    res["errors"][0]["extensions"]["code"].as_str()
}

pub async fn create_user(schema: &AppSchema, name: &str, email: &str) -> Value {
    let res = exec(
        schema,
        "mutation($name: String!, $email: String!) { createUser(name: $name, email: $email) { id name email createdAt } }",
        json!({"name": name, "email": email}),
    )
    .await;
    assert!(res.get("errors").is_none(), "createUser failed: {res}");
    res["data"]["createUser"].clone()
}

pub async fn create_post(schema: &AppSchema, author_id: i64, title: &str, content: Option<&str>) -> Value {
    let res = exec(
        schema,
        "mutation($title: String!, $content: String, $authorId: Int!) { createPost(title: $title, content: $content, authorId: $authorId) { id title content authorId } }",
        json!({"title": title, "content": content, "authorId": author_id}),
    )
    .await;
    assert!(res.get("errors").is_none(), "createPost failed: {res}");
    res["data"]["createPost"].clone()
}

pub fn id_of(obj: &Value) -> i64 {
    obj["id"].as_str().expect("id is a string").parse().expect("numeric id")
}

/// Runs client requests in-process against a schema.
pub struct SchemaTransport {
    schema: AppSchema,
}

impl SchemaTransport {
    pub fn new(schema: AppSchema) -> Self {
        Self { schema }
    }
}

#[async_trait]
impl Transport for SchemaTransport {
    async fn execute(&self, req: &GraphQlRequest) -> Result<GraphQlResponse, ClientError> {
        let mut gql = Request::new(req.query.clone()).variables(Variables::from_json(req.variables.clone()));
        if let Some(name) = &req.operation_name {
            gql = gql.operation_name(name.clone());
        }
        let res = self.schema.execute(gql).await;
        Ok(serde_json::from_value(serde_json::to_value(&res)?)?)
    }
}
