use serde::Deserialize;

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "http://localhost:3000/api/graphql";

/// Which `Store` implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => anyhow::bail!("unknown STORE_BACKEND: {other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub backend: StoreBackend,
    pub database: Option<DatabaseConfig>,
    pub host: String,
    pub port: u16,
    pub batch_relations: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend = match std::env::var("STORE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => StoreBackend::Postgres,
        };
        let database = match backend {
            StoreBackend::Postgres => Some(DatabaseConfig {
                url: std::env::var("DATABASE_URL")?,
                max_connections: std::env::var("DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(10),
            }),
            StoreBackend::Memory => None,
        };
        Ok(Self {
            backend,
            database,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(3000),
            batch_relations: std::env::var("GRAPHQL_BATCH_RELATIONS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        })
    }

    /// In-memory configuration used by tests and local demos.
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            database: None,
            host: "127.0.0.1".into(),
            port: 0,
            batch_relations: false,
        }
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_known_names() {
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!(" Memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn flags_accept_common_truthy_values() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag("ON"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
