/// Structured error types for storedesk-core.
///
/// Uses `thiserror` so library consumers can match on failures.
/// The `storedesk` binary wraps these in `anyhow` with context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading and saving errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file does not exist
    #[error("Config not found at {path:?}\n\nRun: storedesk config init")]
    NotFound { path: PathBuf },

    /// Reading or writing the config file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File is not valid TOML for the config schema
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config could not be serialized back to TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is present but unusable
    #[error("Invalid config value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Result type alias for storedesk-core operations
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Create an I/O error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid value error
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/tmp/storedesk.toml"),
        };
        assert!(err.to_string().contains("storedesk config init"));

        let err = ConfigError::invalid("server.bind", "not a socket address");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'server.bind': not a socket address"
        );
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = ConfigError::io("/etc/storedesk.toml", io_err);

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/etc/storedesk.toml"));
    }
}
