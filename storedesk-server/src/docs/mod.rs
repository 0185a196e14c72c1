//! Document layer - the managers collection
//!
//! Managers are keyed by their user-supplied 4-character id, which is
//! also the document `_id`.

pub mod mongo;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::db::DbError;
use crate::models::{ManagerId, ManagerName, Salary};

pub use mongo::MongoManagers;

/// Manager document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub salary: i64,
}

/// Validated manager ready for insertion
#[derive(Debug, Clone)]
pub struct NewManager {
    pub id: ManagerId,
    pub name: ManagerName,
    pub salary: Salary,
}

impl From<NewManager> for Manager {
    fn from(m: NewManager) -> Self {
        Self {
            id: m.id.as_str().to_owned(),
            name: m.name.as_str().to_owned(),
            salary: m.salary.get(),
        }
    }
}

/// Document store operations on managers.
#[async_trait]
pub trait ManagerDirectory: Send + Sync + 'static {
    /// All managers ordered by id.
    async fn list(&self) -> Result<Vec<Manager>, DbError>;

    /// Look up one manager; absence is `Ok(None)`, not an error.
    async fn find(&self, id: &str) -> Result<Option<Manager>, DbError>;

    /// Insert a manager, re-checking id uniqueness. An existing id is a
    /// `Conflict` on `_id`.
    async fn insert(&self, manager: NewManager) -> Result<Manager, DbError>;

    /// Set name and salary, creating the document when it is absent.
    async fn upsert(&self, id: &str, name: &str, salary: i64) -> Result<(), DbError>;

    /// Delete by id; returns whether a document was removed.
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}
