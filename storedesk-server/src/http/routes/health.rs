//! Liveness endpoint
//!
//! Answers without touching either datastore, so it stays up while
//! Postgres or MongoDB is unreachable.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: env!("CARGO_PKG_NAME"),
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_names_service_and_version() {
        let Json(body) = health().await;
        assert_eq!(body.service, "storedesk-server");
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }
}
