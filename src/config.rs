use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub seed_sample_data: bool,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_source(|name| env::var(name).ok())
    }

    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = get_parse_or(&lookup, "STORE_BACKEND", StoreBackend::Postgres)?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(Error::Config(
                "Missing environment variable: DATABASE_URL".to_string(),
            ));
        }

        let db_max_connections = get_parse_or(&lookup, "DB_MAX_CONNECTIONS", 10u32)?;
        let db_min_connections = get_parse_or(&lookup, "DB_MIN_CONNECTIONS", 1u32)?;
        if db_max_connections == 0 || db_min_connections > db_max_connections {
            return Err(Error::Config(format!(
                "Invalid pool bounds: min {} max {}",
                db_min_connections, db_max_connections
            )));
        }

        Ok(Self {
            server_address: get_required(&lookup, "SERVER_ADDRESS")?,
            store_backend,
            database_url,
            db_max_connections,
            db_min_connections,
            db_acquire_timeout_secs: get_parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 30u64)?,
            seed_sample_data: get_parse_or(&lookup, "SEED_SAMPLE_DATA", false)?,
            log_format: get_parse_or(&lookup, "LOG_FORMAT", LogFormat::Text)?,
        })
    }
}

fn get_required<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|name| vars.get(name).cloned())
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err = load(&[("SERVER_ADDRESS", "127.0.0.1:8080")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn memory_backend_runs_without_database() {
        let config = load(&[
            ("SERVER_ADDRESS", "127.0.0.1:8080"),
            ("STORE_BACKEND", "memory"),
        ])
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.database_url, None);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn pool_bounds_and_flags_are_parsed() {
        let config = load(&[
            ("SERVER_ADDRESS", "0.0.0.0:80"),
            ("DATABASE_URL", "postgres://localhost/great_job"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("DB_MIN_CONNECTIONS", "5"),
            ("SEED_SAMPLE_DATA", "true"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(config.db_min_connections, 5);
        assert!(config.seed_sample_data);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn inverted_pool_bounds_are_rejected() {
        let err = load(&[
            ("SERVER_ADDRESS", "0.0.0.0:80"),
            ("STORE_BACKEND", "memory"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("DB_MIN_CONNECTIONS", "3"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn malformed_numbers_name_the_variable() {
        let err = load(&[
            ("SERVER_ADDRESS", "0.0.0.0:80"),
            ("STORE_BACKEND", "memory"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "soon"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("DB_ACQUIRE_TIMEOUT_SECS"));
    }
}
