use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::state::AppState;

pub const GRAPHQL_PATH: &str = "/api/graphql";

pub fn routes() -> Router<AppState> {
    Router::new().route(GRAPHQL_PATH, get(sandbox).post(graphql_handler))
}

/// POST /api/graphql { query, variables?, operationName? } -> { data, errors? }
pub async fn graphql_handler(
    State(state): State<AppState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GET /api/graphql: Apollo Sandbox pointed at this endpoint.
pub async fn sandbox() -> impl IntoResponse {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>mygraph - Apollo Sandbox</title>
    <style>body {{ margin: 0; overflow: hidden; }}</style>
</head>
<body>
    <div id="sandbox" style="width: 100vw; height: 100vh;"></div>
    <script src="https://embeddable-sandbox.cdn.apollographql.com/_latest/embeddable-sandbox.umd.production.min.js"></script>
    <script>
        new window.EmbeddedSandbox({{
            target: '#sandbox',
            initialEndpoint: window.location.origin + '{GRAPHQL_PATH}',
        }});
    </script>
</body>
</html>"#
    ))
}
