//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                   | Default                          |
//! |----------------------------|----------------------------------|
//! | `KASIR_DB_PATH`            | `<data dir>/kasir/pos.db`        |
//! | `HOST`                     | `0.0.0.0`                        |
//! | `PORT`                     | `5000`                           |
//! | `KASIR_DB_MAX_CONNECTIONS` | `5`                              |

use directories::ProjectDirs;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Upper bound on pooled SQLite connections
    pub db_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            db_path: env::var("KASIR_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_db_path()),

            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            db_max_connections: env::var("KASIR_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("KASIR_DB_MAX_CONNECTIONS".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "KASIR_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Socket address to bind.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HOST".to_string()))
    }
}

/// Platform data directory, or the working directory when there is no home.
fn default_db_path() -> PathBuf {
    match ProjectDirs::from("com", "kasir", "kasir") {
        Some(dirs) => dirs.data_dir().join("pos.db"),
        None => PathBuf::from("pos.db"),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            db_path: PathBuf::from("pos.db"),
            host: "127.0.0.1".to_string(),
            port: 5000,
            db_max_connections: 5,
        };
        assert_eq!(config.bind_address().unwrap().port(), 5000);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..config
        };
        assert!(matches!(
            bad.bind_address(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_default_db_path_is_pos_db() {
        assert!(default_db_path().ends_with("pos.db"));
    }
}
