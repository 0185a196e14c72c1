//! Relational connection pool.
//!
//! `max_connections` is the only limit on concurrent store/product queries;
//! once it is reached, further handlers wait for a connection to free up.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool size used by `migrate` and by tests; `serve` takes its size from
/// `[postgres] max_connections`.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 3;

/// Connect to the relational store with the default pool size.
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/proj2023").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "connecting relational pool");

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    // DATABASE_URL=postgres://... cargo test -p storedesk-server -- --ignored

    fn database_url() -> String {
        std::env::var("DATABASE_URL").expect("DATABASE_URL required")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn default_pool_answers_queries() {
        let pool = create_pool(&database_url()).await.expect("pool creation failed");

        let (one,): (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(one, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_is_bounded() {
        let pool = create_pool_with_options(&database_url(), 2)
            .await
            .expect("pool creation failed");

        let first = pool.acquire().await.expect("first connection");
        let _second = pool.acquire().await.expect("second connection");
        assert_eq!(pool.size(), 2);

        let third = tokio::time::timeout(Duration::from_millis(300), pool.acquire()).await;
        assert!(third.is_err(), "a third connection was handed out");
        assert_eq!(pool.size(), 2);

        drop(first);
        let reused = tokio::time::timeout(Duration::from_secs(5), pool.acquire()).await;
        assert!(matches!(reused, Ok(Ok(_))));
    }
}
