use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("LOG_FILE_PATH and LOG_ARCHIVE_PATTERN must be set together")]
    IncompleteLogFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileConfig {
    pub path: String,
    pub archive_pattern: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_address: IpAddr,
    pub port: u16,
    pub cors_origin: HeaderValue,
    pub log_file: Option<LogFileConfig>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let bind_address = match get("BIND_ADDRESS") {
            Some(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::Invalid {
                    key: "BIND_ADDRESS",
                    value,
                })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let cors_origin = get("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin =
            HeaderValue::from_str(cors_origin.trim()).map_err(|_| ConfigError::Invalid {
                key: "CORS_ORIGIN",
                value: cors_origin.clone(),
            })?;

        let log_file = match (get("LOG_FILE_PATH"), get("LOG_ARCHIVE_PATTERN")) {
            (Some(path), Some(archive_pattern)) => Some(LogFileConfig {
                path,
                archive_pattern,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteLogFile),
        };

        Ok(Self {
            database_url,
            bind_address,
            port,
            cors_origin,
            log_file,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DATABASE_URL", "chess_players.db")]).unwrap();
        assert_eq!(config.database_url, "chess_players.db");
        assert_eq!(config.port, 5000);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite://data/players.db"),
            ("PORT", "8080"),
            ("BIND_ADDRESS", "127.0.0.1"),
            ("CORS_ORIGIN", "https://ratings.example.org"),
            ("LOG_FILE_PATH", "logs/server.log"),
            ("LOG_ARCHIVE_PATTERN", "logs/server.{}.log.gz"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.cors_origin, "https://ratings.example.org");
        assert_eq!(
            config.log_file,
            Some(LogFileConfig {
                path: "logs/server.log".to_string(),
                archive_pattern: "logs/server.{}.log.gz".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_database_url() {
        assert!(matches!(
            config_from(&[("PORT", "5000")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
        assert!(matches!(
            config_from(&[("DATABASE_URL", "  ")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("DATABASE_URL", "db"), ("PORT", "70000")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("DATABASE_URL", "db"), ("BIND_ADDRESS", "localhost")]),
            Err(ConfigError::Invalid {
                key: "BIND_ADDRESS",
                ..
            })
        ));
        assert!(matches!(
            config_from(&[("DATABASE_URL", "db"), ("CORS_ORIGIN", "http://a\nb")]),
            Err(ConfigError::Invalid {
                key: "CORS_ORIGIN",
                ..
            })
        ));
    }

    #[test]
    fn test_log_file_requires_both_settings() {
        assert!(matches!(
            config_from(&[("DATABASE_URL", "db"), ("LOG_FILE_PATH", "server.log")]),
            Err(ConfigError::IncompleteLogFile)
        ));
    }
}
