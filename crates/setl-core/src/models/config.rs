//! Configuration structures for the ingestion pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SetlError};

/// Main configuration for the setl pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetlConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,

    /// Batch processing settings.
    pub batch: BatchConfig,
}

impl SetlConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SetlError::Config(format!("invalid config file: {}", e)))
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection URL. The `DATABASE_URL` environment
    /// variable takes precedence when set.
    pub url: String,

    /// Maximum pool connections.
    pub max_connections: u32,

    /// Minimum pool connections kept open.
    pub min_connections: u32,

    /// Timeout for acquiring a connection from the pool, in seconds.
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Resolve the connection URL, preferring the environment.
    pub fn resolve_url(&self) -> Option<String> {
        std::env::var("DATABASE_URL").ok().or_else(|| {
            if self.url.is_empty() {
                None
            } else {
                Some(self.url.clone())
            }
        })
    }
}

/// Batch coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Per-document processing deadline, in seconds. A timeout fails
    /// only the document that hit it, never its siblings.
    pub document_timeout_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            document_timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SetlConfig::default();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.batch.document_timeout_secs, 60);
    }

    #[test]
    fn test_partial_config_parses() {
        let config: SetlConfig =
            serde_json::from_str(r#"{"database": {"max_connections": 12}}"#).unwrap();
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.database.min_connections, 1);
    }
}
