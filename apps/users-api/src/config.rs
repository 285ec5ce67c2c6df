//! Server configuration.
//!
//! Layered with the `config` crate, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `users-api.toml` in the working directory (optional)
//! 3. `SHOP_*` environment variables (`SHOP_PORT=9000`, `SHOP_DATABASE_PATH=...`)

use std::net::SocketAddr;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

const CONFIG_FILE: &str = "users-api";
const ENV_PREFIX: &str = "SHOP";

/// Users server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Public key handed to clients after registration
    pub supermarket_public_key: String,

    /// Requests running longer than this are answered with 408
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Loads defaults, then the optional config file, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Defaults overlaid with a TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000_i64)?
            .set_default("database_path", "database/users.db")?
            .set_default("supermarket_public_key", "")?
            .set_default("request_timeout_secs", 30_i64)
    }

    /// Address to bind, as `host:port`.
    pub fn bind_address(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_toml("").unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.database_path, "database/users.db");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.bind_address().unwrap().port(), 8000);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            port = 9000
            supermarket_public_key = "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.supermarket_public_key, "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(ServerConfig::from_toml("port = 70000").is_err());
    }
}
