//! Application configuration.
//!
//! Configuration loads from an optional TOML file plus environment
//! overrides, with defaults sufficient to run with neither. The
//! observability behavior flags are carried explicitly in
//! [`ObservabilityConfig`] and injected at construction time; nothing in
//! the core reads the environment at call sites.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// HTTP server binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

/// SQLite storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "noticeboard.db".to_string(), pool_size: 4 }
    }
}

/// Behavior flags for the observability core.
///
/// `verbose` selects human-readable rendering with raw internal messages;
/// `redact` keeps context sanitization on (it stays on in every supported
/// deployment and exists as a flag only so tests can assert both paths).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub verbose: bool,
    pub redact: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { verbose: false, redact: true }
    }
}

/// Capacities of the bounded in-memory stores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreLimits {
    pub audit_capacity: usize,
    pub metrics_capacity: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self { audit_capacity: 10_000, metrics_capacity: 1_000 }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
    pub limits: StoreLimits,
}

impl Config {
    /// Load configuration: `.env`, then the TOML file named by
    /// `NOTICEBOARD_CONFIG` (if any), then environment overrides.
    pub fn load() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let mut config = match std::env::var("NOTICEBOARD_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            AppError::internal(format!("설정 파일을 읽을 수 없습니다: {}: {err}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|err| {
            AppError::internal(format!("설정 파일 구문 오류: {}: {err}", path.display()))
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("NOTICEBOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("NOTICEBOARD_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(path) = std::env::var("NOTICEBOARD_DB_PATH") {
            self.database.path = path;
        }
        if let Ok(verbose) = std::env::var("NOTICEBOARD_VERBOSE") {
            self.observability.verbose = matches!(verbose.as_str(), "1" | "true" | "yes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn defaults_are_runnable() {
        let config = Config::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.limits.audit_capacity, 10_000);
        assert_eq!(config.limits.metrics_capacity, 1_000);
        assert!(!config.observability.verbose);
        assert!(config.observability.redact);
    }

    #[test]
    fn parses_partial_toml() {
        let parsed: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [observability]
            verbose = true
            "#,
        )
        .unwrap();

        assert_eq!(parsed.server.port, 9000);
        assert!(parsed.observability.verbose);
        // Unspecified sections keep their defaults.
        assert_eq!(parsed.database.pool_size, 4);
    }
}
