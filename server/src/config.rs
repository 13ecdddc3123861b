//! Process configuration.

use std::{net::SocketAddr, num::ParseIntError, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PATH: &str = "todos.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Configuration for the todo server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port to listen on, on all interfaces.
    pub port: u16,
    /// Path of the store file.
    pub db_path: PathBuf,
}

impl Config {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: db_path.into(),
        }
    }

    /// Sets the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Reads `PORT` and `TODO_DB_PATH`. Unset and empty values both mean
    /// "use the default".
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like `from_env`, with variables resolved through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let mut config = Self::new(var("TODO_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.into()));
        if let Some(value) = var("PORT") {
            let port = value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?;
            config = config.with_port(port);
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_path, PathBuf::from("todos.db"));
    }

    #[test]
    fn empty_values_mean_default() {
        let config = Config::from_lookup(lookup(&[("PORT", ""), ("TODO_DB_PATH", "")])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_port_and_path() {
        let config =
            Config::from_lookup(lookup(&[("PORT", "9000"), ("TODO_DB_PATH", "/data/t.db")]))
                .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.db_path, PathBuf::from("/data/t.db"));
        assert_eq!(config.bind_addr(), "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn rejects_unparsable_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "eighty"));
    }
}
