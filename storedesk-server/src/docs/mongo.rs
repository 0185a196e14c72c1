//! MongoDB-backed [`ManagerDirectory`]

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, Collection};

use super::{Manager, ManagerDirectory, NewManager};
use crate::db::error::{DbError, KEY_MANAGER_ID};

/// Server error code for a duplicate `_id` / unique index hit
const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

/// Managers collection over one shared client handle
#[derive(Clone)]
pub struct MongoManagers {
    collection: Collection<Manager>,
}

impl MongoManagers {
    /// Connect and ping so a bad URI fails at startup, not on first request.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, DbError> {
        let client = Client::with_uri_str(uri).await?;
        client.database(database).run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database, collection, "connected to document store");
        Ok(Self::new(&client, database, collection))
    }

    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
        }
    }
}

#[async_trait]
impl ManagerDirectory for MongoManagers {
    async fn list(&self) -> Result<Vec<Manager>, DbError> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        let managers = cursor.try_collect().await?;
        Ok(managers)
    }

    async fn find(&self, id: &str) -> Result<Option<Manager>, DbError> {
        let manager = self.collection.find_one(doc! { "_id": id }).await?;
        if manager.is_none() {
            tracing::debug!(id, "manager not found");
        }
        Ok(manager)
    }

    async fn insert(&self, manager: NewManager) -> Result<Manager, DbError> {
        if self.find(manager.id.as_str()).await?.is_some() {
            return Err(DbError::conflict("manager", KEY_MANAGER_ID, manager.id.as_str()));
        }

        let manager = Manager::from(manager);
        self.collection.insert_one(&manager).await.map_err(|e| {
            if is_duplicate_key(&e) {
                DbError::conflict("manager", KEY_MANAGER_ID, manager.id.as_str())
            } else {
                DbError::Mongo(e)
            }
        })?;

        tracing::info!(id = %manager.id, "manager inserted");
        Ok(manager)
    }

    async fn upsert(&self, id: &str, name: &str, salary: i64) -> Result<(), DbError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "name": name, "salary": salary } },
            )
            .upsert(true)
            .await?;

        tracing::info!(
            id,
            modified = result.modified_count,
            created = result.upserted_id.is_some(),
            "manager updated"
        );
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        tracing::info!(id, deleted = result.deleted_count, "manager delete");
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ManagerId, ManagerName, Salary};

    // Run with: MONGODB_URI=mongodb://... cargo test -p storedesk-server -- --ignored

    async fn managers() -> MongoManagers {
        let uri = std::env::var("MONGODB_URI").expect("MONGODB_URI required");
        let managers = MongoManagers::connect(&uri, "storedesk_test", "managers")
            .await
            .expect("connect failed");
        managers.collection.delete_many(doc! {}).await.expect("clear failed");
        managers
    }

    fn new_manager(id: &str) -> NewManager {
        NewManager {
            id: ManagerId::new(id).unwrap(),
            name: ManagerName::new("Mary Smith").unwrap(),
            salary: Salary::new(40_000).unwrap(),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_insert_is_conflict() {
        let managers = managers().await;
        managers.insert(new_manager("M001")).await.unwrap();

        let err = managers.insert(new_manager("M001")).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { key: KEY_MANAGER_ID, .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn upsert_creates_missing_manager() {
        let managers = managers().await;
        managers.upsert("M777", "Newcomer", 50_000).await.unwrap();

        let found = managers.find("M777").await.unwrap().expect("upserted");
        assert_eq!(found.salary, 50_000);
        assert!(managers.delete("M777").await.unwrap());
        assert!(!managers.delete("M777").await.unwrap());
    }
}
