use crate::config::AppConfig;
use crate::db;
use crate::graphql::{build_schema, AppSchema};
use crate::store::{DynStore, MemoryStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: DynStore,
    pub schema: AppSchema,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = db::open_store(&config).await?;
        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: DynStore, config: Arc<AppConfig>) -> Self {
        let schema = build_schema(store.clone(), config.batch_relations);
        Self {
            store,
            schema,
            config,
        }
    }

    /// Fresh in-memory state for tests and demos.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new()) as DynStore;
        Self::from_parts(store, Arc::new(AppConfig::memory()))
    }
}
