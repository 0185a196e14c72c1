//! Store endpoints
//!
//! Every mutation runs its checks in a fixed order and stops at the first
//! failure. The checks against the relational side only shape the error
//! message; the `store_mgrid_key` constraint is what keeps a manager on
//! one store when two requests race, and a lost race comes back as 409.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::db::error::{KEY_MGRID, KEY_MGRID_LOCATION, KEY_SID};
use crate::db::{DbError, NewStore};
use crate::http::error::ApiError;
use crate::http::extractors::ValidForm;
use crate::http::server::AppState;
use crate::models::{Location, ManagerId, StoreId};
use crate::views;

/// POST /stores/add form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddStoreForm {
    pub sid: String,
    pub location: String,
    pub mgrid: String,
}

/// POST /stores/update/{id} form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStoreForm {
    pub newmgrid: String,
    #[serde(rename = "newLocation")]
    pub new_location: String,
}

fn sid_taken(sid: &str) -> String {
    format!("Store ID: {sid} already exists")
}

fn manager_taken(mgrid: &str) -> String {
    format!("Manager ID: {mgrid} is already managing another store")
}

fn manager_missing(mgrid: &str) -> String {
    format!("Manager ID: {mgrid} does not exist")
}

/// GET /stores
async fn list_stores(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let stores = state.catalog.list_stores().await?;
    Ok(Html(views::stores_page(&stores)))
}

/// GET /stores/add
async fn add_store_page() -> Html<String> {
    Html(views::add_store_form())
}

/// POST /stores/add
async fn add_store(
    State(state): State<Arc<AppState>>,
    ValidForm(form): ValidForm<AddStoreForm>,
) -> Result<Redirect, ApiError> {
    let sid = StoreId::new(&form.sid)?;
    if state.catalog.store_by_id(sid.as_str()).await?.is_some() {
        return Err(ApiError::rejected(sid_taken(sid.as_str())));
    }

    let location = Location::new(&form.location)?;
    let mgrid = ManagerId::new(&form.mgrid)?;

    if state.catalog.store_by_manager(mgrid.as_str()).await?.is_some() {
        return Err(ApiError::rejected(manager_taken(mgrid.as_str())));
    }
    if state.managers.find(mgrid.as_str()).await?.is_none() {
        return Err(ApiError::rejected(manager_missing(mgrid.as_str())));
    }

    let store = NewStore { sid, location, mgrid };
    match state.catalog.insert_store(&store).await {
        Ok(()) => {}
        Err(DbError::Conflict { key: KEY_SID, .. }) => {
            return Err(ApiError::conflict(sid_taken(store.sid.as_str())))
        }
        Err(DbError::Conflict { key: KEY_MGRID, .. }) => {
            return Err(ApiError::conflict(manager_taken(store.mgrid.as_str())))
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(
        sid = %store.sid.as_str(),
        mgrid = %store.mgrid.as_str(),
        "store created"
    );
    Ok(Redirect::to("/stores"))
}

/// GET /stores/update/{id}
async fn update_store_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let store = state
        .catalog
        .store_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("store", &id))?;
    Ok(Html(views::update_store_form(&store)))
}

/// POST /stores/update/{id}
async fn update_store(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidForm(form): ValidForm<UpdateStoreForm>,
) -> Result<Redirect, ApiError> {
    let location = Location::new(&form.new_location)?;
    let mgrid = ManagerId::new(&form.newmgrid)?;

    if state.catalog.store_by_id(&id).await?.is_none() {
        return Err(ApiError::not_found("store", &id));
    }
    if state.managers.find(mgrid.as_str()).await?.is_none() {
        return Err(ApiError::rejected(manager_missing(mgrid.as_str())));
    }

    match state.catalog.reassign_store(&id, &mgrid, &location).await {
        Ok(()) => {}
        Err(DbError::Conflict {
            key: KEY_MGRID_LOCATION,
            ..
        }) => {
            return Err(ApiError::rejected(format!(
                "Manager ID: {} at location {} already belongs to another store",
                mgrid.as_str(),
                location.as_str()
            )))
        }
        Err(DbError::Conflict { key: KEY_MGRID, .. }) => {
            return Err(ApiError::conflict(manager_taken(mgrid.as_str())))
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(sid = %id, mgrid = %mgrid.as_str(), "store updated");
    Ok(Redirect::to("/stores"))
}

/// POST /stores/delete/{id}
async fn delete_store(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    match state.catalog.delete_store(&id).await {
        Ok(()) => {}
        Err(DbError::Referenced { .. }) => {
            return Err(ApiError::referenced(format!(
                "Cannot delete store {id} because it is referenced in other records"
            )))
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(sid = %id, "store deleted");
    Ok(Redirect::to("/stores"))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stores", get(list_stores))
        .route("/stores/add", get(add_store_page).post(add_store))
        .route("/stores/update/{id}", get(update_store_page).post(update_store))
        .route("/stores/delete/{id}", post(delete_store))
}
