use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Centralized configuration for the storedesk server and CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoredeskConfig {
    pub server: ServerSection,
    pub postgres: PostgresSection,
    pub mongo: MongoSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address the HTTP server binds to
    pub bind: String,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for PostgresSection {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/proj2023".to_string(),
            max_connections: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoSection {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for MongoSection {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "proj2023MongoDB".to_string(),
            collection: "managers".to_string(),
        }
    }
}

impl StoredeskConfig {
    /// Load config from an explicit path, expanding `${VAR}` references.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.expand_variables(|name| env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Load from `path` (or the default location) when the file exists,
    /// otherwise fall back to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);

        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Get config file path: ~/.storedesk/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".storedesk/config.toml")
    }

    /// Parsed bind address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e| ConfigError::invalid("server.bind", format!("{}", e)))
    }

    fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if self.postgres.max_connections == 0 {
            return Err(ConfigError::invalid(
                "postgres.max_connections",
                "must be at least 1",
            ));
        }

        if self.mongo.collection.is_empty() {
            return Err(ConfigError::invalid("mongo.collection", "cannot be empty"));
        }

        Ok(())
    }

    /// Expand ${var} references in connection strings
    fn expand_variables(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.server.bind = expand_string(&self.server.bind, &lookup);
        self.postgres.url = expand_string(&self.postgres.url, &lookup);
        self.mongo.uri = expand_string(&self.mongo.uri, &lookup);
        self.mongo.database = expand_string(&self.mongo.database, &lookup);
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str).map_err(|e| ConfigError::io(path, e))?;

        Ok(())
    }
}

/// Replace every `${NAME}` with the looked-up value (empty when unset).
/// An unterminated `${` is kept verbatim.
fn expand_string(s: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find('}') {
            Some(end) => {
                result.push_str(&lookup(&after[..end]).unwrap_or_default());
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}
