pub mod config;
pub mod error;

pub use config::{MongoSection, PostgresSection, ServerSection, StoredeskConfig};
pub use error::{ConfigError, Result};
