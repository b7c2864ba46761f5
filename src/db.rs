use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::{AppConfig, StoreBackend};
use crate::store::{DynStore, MemoryStore, PgStore};

pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .context("connect to database")?;
    Ok(db)
}

/// Apply `migrations/`. Failures are logged and startup continues, so a
/// database managed out of band still works.
pub async fn migrate(db: &PgPool) {
    if let Err(e) = sqlx::migrate!("./migrations").run(db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }
}

/// Open the store selected by `STORE_BACKEND`.
pub async fn open_store(config: &AppConfig) -> anyhow::Result<DynStore> {
    match config.backend {
        StoreBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .context("DATABASE_URL is required for the postgres backend")?;
            let db = connect(&database.url, database.max_connections).await?;
            migrate(&db).await;
            tracing::info!(max_connections = database.max_connections, "postgres store ready");
            Ok(Arc::new(PgStore::new(db)))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
