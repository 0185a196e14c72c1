//! Relational data access: stores, products and their associations.

use async_trait::async_trait;
use sqlx::FromRow;

use super::error::{DbError, KEY_MGRID_LOCATION};
use crate::models::{Location, ManagerId, StoreId};

/// Store record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Store {
    pub sid: String,
    pub location: String,
    pub mgrid: String,
}

/// One row of the product list, joined with the store stocking it.
///
/// Store columns are `None` for products not stocked anywhere.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductListing {
    pub pid: String,
    pub productdesc: String,
    pub supplier: Option<String>,
    pub sid: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
}

/// Validated store ready for insertion
#[derive(Debug, Clone)]
pub struct NewStore {
    pub sid: StoreId,
    pub location: Location,
    pub mgrid: ManagerId,
}

/// Relational store operations.
///
/// Every method is a single statement; nothing here opens a transaction.
/// Writes that must hold under concurrency are carried by schema
/// constraints and reported as [`DbError::Conflict`] or
/// [`DbError::Referenced`].
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    /// Products joined with store and price, ordered by pid then sid.
    async fn list_products(&self) -> Result<Vec<ProductListing>, DbError>;

    /// All stores ordered by sid.
    async fn list_stores(&self) -> Result<Vec<Store>, DbError>;

    /// Insert a store. Duplicate sid or mgrid is a `Conflict`.
    async fn insert_store(&self, store: &NewStore) -> Result<(), DbError>;

    async fn store_by_id(&self, sid: &str) -> Result<Option<Store>, DbError>;

    async fn store_by_manager(&self, mgrid: &str) -> Result<Option<Store>, DbError>;

    async fn store_by_manager_and_location(
        &self,
        mgrid: &str,
        location: &str,
    ) -> Result<Option<Store>, DbError>;

    /// Overwrite a store's manager and location.
    ///
    /// Unknown sid is `NotFound`; an mgrid held by another store is a
    /// `Conflict` on `mgrid`.
    async fn update_store(
        &self,
        sid: &str,
        mgrid: &ManagerId,
        location: &Location,
    ) -> Result<(), DbError>;

    /// Update a store unless the new (mgrid, location) pair already belongs
    /// to a different store, which is a `Conflict` on `mgrid+location`.
    /// Re-saving a store's own pair is allowed.
    async fn reassign_store(
        &self,
        sid: &str,
        mgrid: &ManagerId,
        location: &Location,
    ) -> Result<(), DbError> {
        if let Some(existing) = self
            .store_by_manager_and_location(mgrid.as_str(), location.as_str())
            .await?
        {
            if existing.sid != sid {
                return Err(DbError::conflict(
                    "store",
                    KEY_MGRID_LOCATION,
                    format!("{}@{}", mgrid.as_str(), location.as_str()),
                ));
            }
        }

        self.update_store(sid, mgrid, location).await
    }

    /// Delete a store. Stores still stocking products are `Referenced`.
    async fn delete_store(&self, sid: &str) -> Result<(), DbError>;

    /// Whether any store stocks this product.
    async fn product_in_any_store(&self, pid: &str) -> Result<bool, DbError>;

    /// Delete a product. Products still stocked are `Referenced`.
    async fn delete_product(&self, pid: &str) -> Result<(), DbError>;
}
