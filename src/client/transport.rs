use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::ClientError;

/// Body of a GraphQL-over-HTTP POST.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Value,
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphQlError {
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.get("code")?.as_str()
    }
}

/// `{ data, errors }` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// Moves one GraphQL request to a server and back.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, req: &GraphQlRequest) -> Result<GraphQlResponse, ClientError>;
}

/// Transport over HTTP POST to a single endpoint.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, req: &GraphQlRequest) -> Result<GraphQlResponse, ClientError> {
        debug!(endpoint = %self.endpoint, operation = ?req.operation_name, "graphql request");
        let res = self
            .http
            .post(&self.endpoint)
            .json(req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json::<GraphQlResponse>().await?)
    }
}
