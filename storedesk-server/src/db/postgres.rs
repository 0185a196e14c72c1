//! Postgres-backed [`Catalog`]
//!
//! - All lookups are single parameterized statements
//! - Uniqueness and referential rules come from the schema constraints
//! - Constraint violations are classified here, never by callers

use async_trait::async_trait;
use sqlx::PgPool;

use super::catalog::{Catalog, NewStore, ProductListing, Store};
use super::error::{DbError, KEY_MGRID, KEY_SID};
use super::migrations::STORE_MGRID_KEY;
use crate::models::{Location, ManagerId};

/// Constraint violation kinds the catalog reacts to
#[derive(Debug, PartialEq, Eq)]
enum Violation {
    Unique { constraint: Option<String> },
    ForeignKey,
}

fn violation(err: &sqlx::Error) -> Option<Violation> {
    let db_err = err.as_database_error()?;

    if db_err.is_unique_violation() {
        Some(Violation::Unique {
            constraint: db_err.constraint().map(str::to_owned),
        })
    } else if db_err.is_foreign_key_violation() {
        Some(Violation::ForeignKey)
    } else {
        None
    }
}

/// Catalog over a shared connection pool
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn list_products(&self) -> Result<Vec<ProductListing>, DbError> {
        let rows = sqlx::query_as::<_, ProductListing>(
            r#"
            SELECT p.pid, p.productdesc, p.supplier, s.sid, s.location, ps.price
            FROM product p
            LEFT JOIN product_store ps ON ps.pid = p.pid
            LEFT JOIN store s ON s.sid = ps.sid
            ORDER BY p.pid, s.sid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_stores(&self) -> Result<Vec<Store>, DbError> {
        let stores = sqlx::query_as::<_, Store>(
            "SELECT sid, location, mgrid FROM store ORDER BY sid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    async fn insert_store(&self, store: &NewStore) -> Result<(), DbError> {
        tracing::debug!(sid = store.sid.as_str(), mgrid = store.mgrid.as_str(), "inserting store");

        sqlx::query("INSERT INTO store (sid, location, mgrid) VALUES ($1, $2, $3)")
            .bind(store.sid.as_str())
            .bind(store.location.as_str())
            .bind(store.mgrid.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::Unique { constraint }) if constraint.as_deref() == Some(STORE_MGRID_KEY) => {
                    DbError::conflict("store", KEY_MGRID, store.mgrid.as_str())
                }
                Some(Violation::Unique { .. }) => {
                    DbError::conflict("store", KEY_SID, store.sid.as_str())
                }
                _ => DbError::Sqlx(e),
            })?;

        Ok(())
    }

    async fn store_by_id(&self, sid: &str) -> Result<Option<Store>, DbError> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT sid, location, mgrid FROM store WHERE sid = $1",
        )
        .bind(sid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    async fn store_by_manager(&self, mgrid: &str) -> Result<Option<Store>, DbError> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT sid, location, mgrid FROM store WHERE mgrid = $1",
        )
        .bind(mgrid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    async fn store_by_manager_and_location(
        &self,
        mgrid: &str,
        location: &str,
    ) -> Result<Option<Store>, DbError> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT sid, location, mgrid FROM store WHERE mgrid = $1 AND location = $2",
        )
        .bind(mgrid)
        .bind(location)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    async fn update_store(
        &self,
        sid: &str,
        mgrid: &ManagerId,
        location: &Location,
    ) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE store SET mgrid = $1, location = $2 WHERE sid = $3")
            .bind(mgrid.as_str())
            .bind(location.as_str())
            .bind(sid)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::Unique { .. }) => {
                    DbError::conflict("store", KEY_MGRID, mgrid.as_str())
                }
                _ => DbError::Sqlx(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("store", sid));
        }

        Ok(())
    }

    async fn delete_store(&self, sid: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM store WHERE sid = $1")
            .bind(sid)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::ForeignKey) => DbError::referenced("store", sid),
                _ => DbError::Sqlx(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("store", sid));
        }

        Ok(())
    }

    async fn product_in_any_store(&self, pid: &str) -> Result<bool, DbError> {
        let stocked: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM product_store WHERE pid = $1)",
        )
        .bind(pid)
        .fetch_one(&self.pool)
        .await?;

        Ok(stocked)
    }

    async fn delete_product(&self, pid: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM product WHERE pid = $1")
            .bind(pid)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::ForeignKey) => DbError::referenced("product", pid),
                _ => DbError::Sqlx(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", pid));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p storedesk-server -- --ignored

    async fn catalog() -> PgCatalog {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        sqlx::query("TRUNCATE product_store, product, store")
            .execute(&pool)
            .await
            .expect("truncate failed");
        PgCatalog::new(pool)
    }

    fn new_store(sid: &str, location: &str, mgrid: &str) -> NewStore {
        NewStore {
            sid: crate::models::StoreId::new(sid).unwrap(),
            location: Location::new(location).unwrap(),
            mgrid: ManagerId::new(mgrid).unwrap(),
        }
    }

    #[test]
    fn non_database_errors_are_unclassified() {
        assert_eq!(violation(&sqlx::Error::RowNotFound), None);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_mgrid_is_conflict_on_mgrid() {
        let catalog = catalog().await;
        catalog.insert_store(&new_store("S1", "Cork", "M001")).await.unwrap();

        let err = catalog
            .insert_store(&new_store("S2", "Galway", "M001"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict { key: KEY_MGRID, .. }));

        let err = catalog
            .insert_store(&new_store("S1", "Galway", "M002"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict { key: KEY_SID, .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn stocked_store_delete_is_referenced() {
        let catalog = catalog().await;
        catalog.insert_store(&new_store("S1", "Cork", "M001")).await.unwrap();
        sqlx::query("INSERT INTO product (pid, productdesc) VALUES ('P1', 'Bread')")
            .execute(catalog.pool())
            .await
            .unwrap();
        sqlx::query("INSERT INTO product_store (pid, sid, price) VALUES ('P1', 'S1', 1.5)")
            .execute(catalog.pool())
            .await
            .unwrap();

        let err = catalog.delete_store("S1").await.unwrap_err();
        assert!(matches!(err, DbError::Referenced { .. }));
        assert!(catalog.product_in_any_store("P1").await.unwrap());
    }
}
