//! Relational layer - connection pool, schema and the store catalog
//!
//! # Design Principles
//!
//! - Connection pool bounds concurrent queries - no global handle
//! - Rely on DB constraints, classify conflicts - pre-checks only shape messages
//! - One statement per operation, no transactions

pub mod catalog;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod postgres;

pub use catalog::{Catalog, NewStore, ProductListing, Store};
pub use error::DbError;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgCatalog;
