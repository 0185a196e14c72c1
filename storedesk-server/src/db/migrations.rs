//! Relational schema for stores and products

use sqlx::PgPool;

use super::DbError;

/// Constraint names the data-access layer classifies violations by
pub const STORE_PKEY: &str = "store_pkey";
pub const STORE_MGRID_KEY: &str = "store_mgrid_key";

/// Create the store/product tables if they are missing.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running relational migrations...");

    // Unique mgrid keeps "one store per manager" atomic under concurrent creates
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS store (
            sid VARCHAR(32) NOT NULL,
            location VARCHAR(64) NOT NULL,
            mgrid VARCHAR(4) NOT NULL,
            CONSTRAINT store_pkey PRIMARY KEY (sid),
            CONSTRAINT store_mgrid_key UNIQUE (mgrid),
            CONSTRAINT store_location_check CHECK (char_length(location) >= 1),
            CONSTRAINT store_mgrid_check CHECK (char_length(mgrid) = 4)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product (
            pid VARCHAR(32) PRIMARY KEY,
            productdesc TEXT NOT NULL,
            supplier TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product_store (
            pid VARCHAR(32) NOT NULL REFERENCES product(pid),
            sid VARCHAR(32) NOT NULL REFERENCES store(sid),
            price DOUBLE PRECISION NOT NULL,
            PRIMARY KEY (pid, sid)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_product_store_sid ON product_store(sid)")
        .execute(pool)
        .await?;

    tracing::info!("Relational migrations complete");
    Ok(())
}
