//! Product endpoints
//!
//! Products are seeded data; the only mutation is delete-if-unstocked.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::get,
    Router,
};

use crate::db::DbError;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::views;

fn in_stores_message(pid: &str) -> String {
    format!("Cannot delete product {pid} because it is currently in stores")
}

/// GET /products - products joined with the stores stocking them
async fn list_products(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let rows = state.catalog.list_products().await?;
    Ok(Html(views::products_page(&rows)))
}

/// GET|POST /products/delete/{pid}
async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(pid): Path<String>,
) -> Result<Redirect, ApiError> {
    if state.catalog.product_in_any_store(&pid).await? {
        return Err(ApiError::rejected(in_stores_message(&pid)));
    }

    match state.catalog.delete_product(&pid).await {
        Ok(()) => {}
        // stocked between the check and the delete
        Err(DbError::Referenced { .. }) => return Err(ApiError::referenced(in_stores_message(&pid))),
        Err(e) => return Err(e.into()),
    }

    tracing::info!(pid = %pid, "product deleted");
    Ok(Redirect::to("/products"))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/delete/{pid}", get(delete_product).post(delete_product))
}
