//! Typed GraphQL client with an explicit query cache.

mod cache;
pub mod operations;
mod transport;

pub use cache::QueryCache;
pub use operations::Operation;
pub use transport::{GraphQlError, GraphQlRequest, GraphQlResponse, HttpTransport, Transport};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// First error reported by the server, message unchanged.
    #[error("{message}")]
    GraphQl {
        message: String,
        code: Option<String>,
    },

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<&GraphQlError> for ClientError {
    fn from(e: &GraphQlError) -> Self {
        ClientError::GraphQl {
            message: e.message.clone(),
            code: e.code().map(str::to_string),
        }
    }
}

/// Executes operations and mirrors query results in a [`QueryCache`].
///
/// Queries read through the cache. A successful mutation drops the cached
/// queries listed in its `INVALIDATES`; callers decide what to refetch.
pub struct ApiClient {
    transport: Box<dyn Transport>,
    cache: QueryCache,
}

impl ApiClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            cache: QueryCache::new(),
        }
    }

    pub fn http(endpoint: impl Into<String>) -> Self {
        Self::new(HttpTransport::new(endpoint))
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Cache-first read.
    pub async fn query<Op: Operation>(&mut self, vars: &Op::Vars) -> Result<Op::Data, ClientError> {
        let vars = serde_json::to_value(vars)?;
        if let Some(hit) = self.cache.get(Op::NAME, &vars) {
            debug!(operation = Op::NAME, "cache hit");
            return Ok(serde_json::from_value(hit.clone())?);
        }
        self.fetch_into_cache::<Op>(vars).await
    }

    /// Network read that replaces the cached result.
    pub async fn refetch<Op: Operation>(&mut self, vars: &Op::Vars) -> Result<Op::Data, ClientError> {
        let vars = serde_json::to_value(vars)?;
        self.fetch_into_cache::<Op>(vars).await
    }

    pub async fn mutate<Op: Operation>(&mut self, vars: &Op::Vars) -> Result<Op::Data, ClientError> {
        let vars = serde_json::to_value(vars)?;
        let data = self.send(Op::NAME, Op::DOCUMENT, vars).await?;
        for stale in Op::INVALIDATES {
            self.cache.invalidate(stale);
        }
        debug!(operation = Op::NAME, stale = ?Op::INVALIDATES, "mutation applied");
        Ok(serde_json::from_value(data)?)
    }

    /// Forget every cached result of `Op`.
    pub fn invalidate<Op: Operation>(&mut self) {
        let dropped = self.cache.invalidate(Op::NAME);
        debug!(operation = Op::NAME, dropped, "cache invalidated");
    }

    async fn fetch_into_cache<Op: Operation>(&mut self, vars: Value) -> Result<Op::Data, ClientError> {
        let data = self.send(Op::NAME, Op::DOCUMENT, vars.clone()).await?;
        let decoded = serde_json::from_value(data.clone())?;
        self.cache.put(Op::NAME, &vars, data);
        Ok(decoded)
    }

    async fn send(&self, name: &str, document: &str, variables: Value) -> Result<Value, ClientError> {
        let req = GraphQlRequest {
            query: document.to_string(),
            variables,
            operation_name: Some(name.to_string()),
        };
        let res = self.transport.execute(&req).await?;
        if let Some(first) = res.errors.first() {
            return Err(first.into());
        }
        res.data.ok_or_else(|| ClientError::GraphQl {
            message: "response carried neither data nor errors".into(),
            code: None,
        })
    }
}
