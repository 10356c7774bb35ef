//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_DATABASE: &str = "recipe_db";
const DEFAULT_COLLECTION: &str = "recipes";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Mongo {
        uri: String,
        database: String,
        collection: String,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend: StoreBackend,
    pub bind_addr: SocketAddr,
    /// Deadline for each store call made on behalf of a request
    pub store_timeout: Duration,
    /// Deadline for connecting to and pinging the store at startup
    pub connect_timeout: Duration,
}

impl Config {
    /// Configuration from process environment variables.
    ///
    /// - STORE_BACKEND: "mongo" (default) | "memory"
    /// - MONGODB_URI: required for the mongo backend
    /// - MONGODB_DATABASE, MONGODB_COLLECTION
    /// - BIND_ADDR, STORE_TIMEOUT_SECS, CONNECT_TIMEOUT_SECS
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend = match get("STORE_BACKEND").as_deref().unwrap_or("mongo") {
            "mongo" => StoreBackend::Mongo {
                uri: get("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?,
                database: get("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                collection: get("MONGODB_COLLECTION")
                    .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                    reason: "expected \"mongo\" or \"memory\"".to_string(),
                })
            }
        };

        let bind_addr_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_raw
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: bind_addr_raw.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            backend,
            bind_addr,
            store_timeout: seconds(
                "STORE_TIMEOUT_SECS",
                get("STORE_TIMEOUT_SECS"),
                DEFAULT_STORE_TIMEOUT_SECS,
            )?,
            connect_timeout: seconds(
                "CONNECT_TIMEOUT_SECS",
                get("CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        })
    }
}

fn seconds(name: &'static str, raw: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name,
            value: raw,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_mongo_defaults() {
        let config = config(&[("MONGODB_URI", "mongodb://localhost:27017")]).unwrap();
        assert_eq!(
            config.backend,
            StoreBackend::Mongo {
                uri: "mongodb://localhost:27017".to_string(),
                database: "recipe_db".to_string(),
                collection: "recipes".to_string(),
            }
        );
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.store_timeout, Duration::from_secs(10));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_uri() {
        assert_eq!(config(&[]), Err(ConfigError::Missing("MONGODB_URI")));
        assert_eq!(
            config(&[("MONGODB_URI", "  ")]),
            Err(ConfigError::Missing("MONGODB_URI"))
        );
    }

    #[test]
    fn test_memory_backend_needs_no_uri() {
        let config = config(&[("STORE_BACKEND", "memory"), ("BIND_ADDR", "127.0.0.1:3000")])
            .unwrap();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn test_unknown_backend() {
        let err = config(&[("STORE_BACKEND", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "STORE_BACKEND", .. }));
    }

    #[test]
    fn test_timeouts() {
        let config = config(&[
            ("STORE_BACKEND", "memory"),
            ("STORE_TIMEOUT_SECS", "3"),
            ("CONNECT_TIMEOUT_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.store_timeout, Duration::from_secs(3));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_timeouts() {
        let zero = config(&[("STORE_BACKEND", "memory"), ("STORE_TIMEOUT_SECS", "0")]);
        assert!(matches!(
            zero,
            Err(ConfigError::Invalid { name: "STORE_TIMEOUT_SECS", .. })
        ));

        let garbage = config(&[("STORE_BACKEND", "memory"), ("CONNECT_TIMEOUT_SECS", "soon")]);
        assert!(matches!(
            garbage,
            Err(ConfigError::Invalid { name: "CONNECT_TIMEOUT_SECS", .. })
        ));
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = config(&[("STORE_BACKEND", "memory"), ("BIND_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "BIND_ADDR", .. }));
    }
}
