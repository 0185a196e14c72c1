//! storedesk-server: store, product and manager administration over HTTP
//!
//! Stores and products live in Postgres, managers in a MongoDB collection.
//! The HTTP layer keeps the two consistent: a store's manager must exist
//! in the document store and may run only one store.

pub mod db;
pub mod docs;
pub mod http;
pub mod memory;
pub mod models;
pub mod views;

pub use db::{create_pool, Catalog, DbError, PgCatalog};
pub use docs::{Manager, ManagerDirectory, MongoManagers};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use memory::{seed_demo, InMemoryCatalog, InMemoryManagers};
