//! In-memory backends for both data-access traits.
//!
//! They enforce the same rules as the real schema (unique sid, unique
//! mgrid, stocked rows block deletes) so the HTTP layer behaves the same
//! against them. Used by the test suite and by `storedesk serve --in-memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::error::{KEY_MANAGER_ID, KEY_MGRID, KEY_SID};
use crate::db::{Catalog, DbError, NewStore, ProductListing, Store};
use crate::docs::{Manager, ManagerDirectory, NewManager};
use crate::models::{Location, ManagerId};

#[derive(Debug, Clone)]
struct Product {
    productdesc: String,
    supplier: Option<String>,
}

#[derive(Debug, Clone)]
struct Stock {
    pid: String,
    sid: String,
    price: f64,
}

#[derive(Debug, Default)]
struct Tables {
    stores: BTreeMap<String, Store>,
    products: BTreeMap<String, Product>,
    stock: Vec<Stock>,
}

/// Catalog held in process memory
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    tables: RwLock<Tables>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a product row.
    pub async fn add_product(&self, pid: &str, productdesc: &str, supplier: Option<&str>) {
        self.tables.write().await.products.insert(
            pid.to_owned(),
            Product {
                productdesc: productdesc.to_owned(),
                supplier: supplier.map(str::to_owned),
            },
        );
    }

    /// Insert a store row without validation, for fixtures.
    async fn seed_store(&self, sid: &str, location: &str, mgrid: &str) {
        self.tables.write().await.stores.insert(
            sid.to_owned(),
            Store {
                sid: sid.to_owned(),
                location: location.to_owned(),
                mgrid: mgrid.to_owned(),
            },
        );
    }

    /// Link a product to a store at a price. Both sides must exist.
    pub async fn stock_product(&self, pid: &str, sid: &str, price: f64) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;

        if !tables.products.contains_key(pid) {
            return Err(DbError::not_found("product", pid));
        }
        if !tables.stores.contains_key(sid) {
            return Err(DbError::not_found("store", sid));
        }

        tables.stock.retain(|s| !(s.pid == pid && s.sid == sid));
        tables.stock.push(Stock {
            pid: pid.to_owned(),
            sid: sid.to_owned(),
            price,
        });
        Ok(())
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn list_products(&self) -> Result<Vec<ProductListing>, DbError> {
        let tables = self.tables.read().await;
        let mut rows = Vec::new();

        for (pid, product) in &tables.products {
            let mut stocked: Vec<&Stock> = tables.stock.iter().filter(|s| &s.pid == pid).collect();
            stocked.sort_by(|a, b| a.sid.cmp(&b.sid));

            if stocked.is_empty() {
                rows.push(ProductListing {
                    pid: pid.clone(),
                    productdesc: product.productdesc.clone(),
                    supplier: product.supplier.clone(),
                    sid: None,
                    location: None,
                    price: None,
                });
                continue;
            }

            for stock in stocked {
                rows.push(ProductListing {
                    pid: pid.clone(),
                    productdesc: product.productdesc.clone(),
                    supplier: product.supplier.clone(),
                    sid: Some(stock.sid.clone()),
                    location: tables.stores.get(&stock.sid).map(|s| s.location.clone()),
                    price: Some(stock.price),
                });
            }
        }

        Ok(rows)
    }

    async fn list_stores(&self) -> Result<Vec<Store>, DbError> {
        Ok(self.tables.read().await.stores.values().cloned().collect())
    }

    async fn insert_store(&self, store: &NewStore) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;

        if tables.stores.contains_key(store.sid.as_str()) {
            return Err(DbError::conflict("store", KEY_SID, store.sid.as_str()));
        }
        if tables.stores.values().any(|s| s.mgrid == store.mgrid.as_str()) {
            return Err(DbError::conflict("store", KEY_MGRID, store.mgrid.as_str()));
        }

        tables.stores.insert(
            store.sid.as_str().to_owned(),
            Store {
                sid: store.sid.as_str().to_owned(),
                location: store.location.as_str().to_owned(),
                mgrid: store.mgrid.as_str().to_owned(),
            },
        );
        Ok(())
    }

    async fn store_by_id(&self, sid: &str) -> Result<Option<Store>, DbError> {
        Ok(self.tables.read().await.stores.get(sid).cloned())
    }

    async fn store_by_manager(&self, mgrid: &str) -> Result<Option<Store>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.stores.values().find(|s| s.mgrid == mgrid).cloned())
    }

    async fn store_by_manager_and_location(
        &self,
        mgrid: &str,
        location: &str,
    ) -> Result<Option<Store>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stores
            .values()
            .find(|s| s.mgrid == mgrid && s.location == location)
            .cloned())
    }

    async fn update_store(
        &self,
        sid: &str,
        mgrid: &ManagerId,
        location: &Location,
    ) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;

        if !tables.stores.contains_key(sid) {
            return Err(DbError::not_found("store", sid));
        }

        if tables
            .stores
            .values()
            .any(|s| s.sid != sid && s.mgrid == mgrid.as_str())
        {
            return Err(DbError::conflict("store", KEY_MGRID, mgrid.as_str()));
        }

        let store = tables
            .stores
            .get_mut(sid)
            .ok_or_else(|| DbError::not_found("store", sid))?;
        store.mgrid = mgrid.as_str().to_owned();
        store.location = location.as_str().to_owned();
        Ok(())
    }

    async fn delete_store(&self, sid: &str) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;

        if tables.stock.iter().any(|s| s.sid == sid) {
            return Err(DbError::referenced("store", sid));
        }

        tables
            .stores
            .remove(sid)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("store", sid))
    }

    async fn product_in_any_store(&self, pid: &str) -> Result<bool, DbError> {
        Ok(self.tables.read().await.stock.iter().any(|s| s.pid == pid))
    }

    async fn delete_product(&self, pid: &str) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;

        if tables.stock.iter().any(|s| s.pid == pid) {
            return Err(DbError::referenced("product", pid));
        }

        tables
            .products
            .remove(pid)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("product", pid))
    }
}

/// Managers held in process memory
#[derive(Debug, Default)]
pub struct InMemoryManagers {
    docs: RwLock<BTreeMap<String, Manager>>,
}

impl InMemoryManagers {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ManagerDirectory for InMemoryManagers {
    async fn list(&self) -> Result<Vec<Manager>, DbError> {
        Ok(self.docs.read().await.values().cloned().collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Manager>, DbError> {
        Ok(self.docs.read().await.get(id).cloned())
    }

    async fn insert(&self, manager: NewManager) -> Result<Manager, DbError> {
        let mut docs = self.docs.write().await;

        if docs.contains_key(manager.id.as_str()) {
            return Err(DbError::conflict("manager", KEY_MANAGER_ID, manager.id.as_str()));
        }

        let manager = Manager::from(manager);
        docs.insert(manager.id.clone(), manager.clone());
        Ok(manager)
    }

    async fn upsert(&self, id: &str, name: &str, salary: i64) -> Result<(), DbError> {
        self.docs.write().await.insert(
            id.to_owned(),
            Manager {
                id: id.to_owned(),
                name: name.to_owned(),
                salary,
            },
        );
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        Ok(self.docs.write().await.remove(id).is_some())
    }
}

/// Populate empty in-memory backends with a small demo data set.
pub async fn seed_demo(catalog: &InMemoryCatalog, managers: &InMemoryManagers) -> Result<(), DbError> {
    for (id, name, salary) in [
        ("M001", "Sean Deegan", 62_000),
        ("M002", "Alan Sheehan", 45_000),
        ("M003", "Mary Kelly", 38_000),
    ] {
        managers.upsert(id, name, salary).await?;
    }

    for (sid, location, mgrid) in [("PP-111", "Cork", "M001"), ("PP-222", "Galway", "M002")] {
        catalog.seed_store(sid, location, mgrid).await;
    }

    catalog.add_product("P001", "Brown Bread", Some("Kerrygold")).await;
    catalog.add_product("P002", "Sliced Ham", Some("Denny")).await;
    catalog.add_product("P003", "Bananas", None).await;
    catalog.stock_product("P001", "PP-111", 2.49).await?;
    catalog.stock_product("P001", "PP-222", 2.59).await?;
    catalog.stock_product("P002", "PP-111", 3.99).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoreId;

    fn new_store(sid: &str, location: &str, mgrid: &str) -> NewStore {
        NewStore {
            sid: StoreId::new(sid).unwrap(),
            location: Location::new(location).unwrap(),
            mgrid: ManagerId::new(mgrid).unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_enforces_unique_sid_then_mgrid() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_store(&new_store("S1", "Cork", "M001")).await.unwrap();

        let err = catalog
            .insert_store(&new_store("S1", "Cork", "M001"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict { key: KEY_SID, .. }));

        let err = catalog
            .insert_store(&new_store("S2", "Galway", "M001"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict { key: KEY_MGRID, .. }));
    }

    #[tokio::test]
    async fn reassign_allows_own_pair_and_rejects_foreign_pair() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_store(&new_store("S1", "Cork", "M001")).await.unwrap();
        catalog.insert_store(&new_store("S2", "Galway", "M002")).await.unwrap();

        let m1 = ManagerId::new("M001").unwrap();
        let cork = Location::new("Cork").unwrap();
        catalog.reassign_store("S1", &m1, &cork).await.unwrap();

        let err = catalog.reassign_store("S2", &m1, &cork).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { key: crate::db::error::KEY_MGRID_LOCATION, .. }));

        // Same manager at a new location still trips the mgrid constraint
        let galway = Location::new("Galway").unwrap();
        let err = catalog.reassign_store("S2", &m1, &galway).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { key: KEY_MGRID, .. }));
    }

    #[tokio::test]
    async fn update_unknown_store_is_not_found() {
        let catalog = InMemoryCatalog::new();
        let err = catalog
            .update_store("nope", &ManagerId::new("M001").unwrap(), &Location::new("X").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "store", .. }));
    }

    #[tokio::test]
    async fn stocked_rows_block_deletes() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_store(&new_store("S1", "Cork", "M001")).await.unwrap();
        catalog.add_product("P1", "Bread", None).await;
        catalog.stock_product("P1", "S1", 1.5).await.unwrap();

        assert!(matches!(
            catalog.delete_store("S1").await.unwrap_err(),
            DbError::Referenced { resource: "store", .. }
        ));
        assert!(matches!(
            catalog.delete_product("P1").await.unwrap_err(),
            DbError::Referenced { resource: "product", .. }
        ));
        assert!(catalog.product_in_any_store("P1").await.unwrap());
    }

    #[tokio::test]
    async fn product_listing_includes_unstocked_products() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_store(&new_store("S1", "Cork", "M001")).await.unwrap();
        catalog.add_product("P1", "Bread", Some("Baker")).await;
        catalog.add_product("P2", "Milk", None).await;
        catalog.stock_product("P1", "S1", 1.5).await.unwrap();

        let rows = catalog.list_products().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].location.as_deref(), Some("Cork"));
        assert_eq!(rows[1].pid, "P2");
        assert_eq!(rows[1].sid, None);
    }

    #[tokio::test]
    async fn stocking_requires_both_sides() {
        let catalog = InMemoryCatalog::new();
        catalog.add_product("P1", "Bread", None).await;

        let err = catalog.stock_product("P1", "S9", 1.0).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "store", .. }));
    }

    #[tokio::test]
    async fn managers_insert_upsert_delete() {
        let managers = InMemoryManagers::new();
        let new = NewManager {
            id: ManagerId::new("M001").unwrap(),
            name: crate::models::ManagerName::new("Mary Kelly").unwrap(),
            salary: crate::models::Salary::new(40_000).unwrap(),
        };

        managers.insert(new.clone()).await.unwrap();
        let err = managers.insert(new).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { key: KEY_MANAGER_ID, .. }));

        managers.upsert("M009", "Someone New", 31_000).await.unwrap();
        assert_eq!(managers.list().await.unwrap().len(), 2);

        assert!(managers.delete("M009").await.unwrap());
        assert!(!managers.delete("M009").await.unwrap());
        assert!(managers.find("M009").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn demo_seed_is_consistent() {
        let catalog = InMemoryCatalog::new();
        let managers = InMemoryManagers::new();
        seed_demo(&catalog, &managers).await.unwrap();

        for store in catalog.list_stores().await.unwrap() {
            assert!(managers.find(&store.mgrid).await.unwrap().is_some());
        }
        assert!(!catalog.product_in_any_store("P003").await.unwrap());
    }
}
