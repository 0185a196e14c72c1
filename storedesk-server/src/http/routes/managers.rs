//! Manager endpoints
//!
//! Create validates every field. Update and delete pass straight through
//! to the document store; both update routes share one upsert handler.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::db::error::KEY_MANAGER_ID;
use crate::db::DbError;
use crate::docs::NewManager;
use crate::http::error::ApiError;
use crate::http::extractors::ValidForm;
use crate::http::server::AppState;
use crate::models::{parse_whole_number, ManagerId, ManagerName, Salary, ValidationError};
use crate::views;

/// POST /managers/add form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddManagerForm {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub salary: String,
}

/// POST /managers/update[/{id}] form
///
/// `managerId` is only sent to the path-less route.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateManagerForm {
    #[serde(rename = "managerId")]
    pub manager_id: Option<String>,
    #[serde(rename = "newName")]
    pub new_name: String,
    #[serde(rename = "newSalary")]
    pub new_salary: String,
}

fn manager_exists(id: &str) -> String {
    format!("Error: Manager {id} already exists")
}

/// GET /managers
async fn list_managers(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let managers = state.managers.list().await?;
    Ok(Html(views::managers_page(&managers)))
}

/// GET /managers/add
async fn add_manager_page() -> Html<String> {
    Html(views::add_manager_form())
}

/// POST /managers/add
async fn add_manager(
    State(state): State<Arc<AppState>>,
    ValidForm(form): ValidForm<AddManagerForm>,
) -> Result<Redirect, ApiError> {
    if state.managers.find(&form.id).await?.is_some() {
        return Err(ApiError::rejected(manager_exists(&form.id)));
    }

    let manager = NewManager {
        id: ManagerId::new(&form.id)?,
        name: ManagerName::new(&form.name)?,
        salary: Salary::parse(&form.salary)?,
    };

    let manager = match state.managers.insert(manager).await {
        Ok(manager) => manager,
        Err(DbError::Conflict {
            key: KEY_MANAGER_ID,
            ..
        }) => return Err(ApiError::conflict(manager_exists(&form.id))),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(id = %manager.id, "manager created");
    Ok(Redirect::to("/managers"))
}

/// GET /managers/update/{id}
async fn update_manager_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let manager = state
        .managers
        .find(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("manager", &id))?;
    Ok(Html(views::update_manager_form(&manager)))
}

/// POST /managers/update - id travels in the form
async fn update_manager(
    State(state): State<Arc<AppState>>,
    ValidForm(form): ValidForm<UpdateManagerForm>,
) -> Result<Redirect, ApiError> {
    let id = form.manager_id.clone().unwrap_or_default();
    apply_update(&state, &id, &form).await
}

/// POST /managers/update/{id} - id travels in the path
async fn update_manager_by_path(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidForm(form): ValidForm<UpdateManagerForm>,
) -> Result<Redirect, ApiError> {
    apply_update(&state, &id, &form).await
}

/// Upsert name and salary; an unknown id creates the manager. The id is
/// taken verbatim, untrimmed.
async fn apply_update(
    state: &AppState,
    id: &str,
    form: &UpdateManagerForm,
) -> Result<Redirect, ApiError> {
    if id.is_empty() {
        return Err(ValidationError::Empty { field: "manager ID" }.into());
    }
    let salary = parse_whole_number("salary", &form.new_salary)?;

    state.managers.upsert(id, &form.new_name, salary).await?;

    tracing::info!(id, "manager updated");
    Ok(Redirect::to("/managers"))
}

/// POST /managers/delete/{id}
async fn delete_manager(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let removed = state.managers.delete(&id).await?;
    tracing::info!(id = %id, removed, "manager delete");
    Ok(Redirect::to("/managers"))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/managers", get(list_managers))
        .route("/managers/add", get(add_manager_page).post(add_manager))
        .route("/managers/update", post(update_manager))
        .route(
            "/managers/update/{id}",
            get(update_manager_page).post(update_manager_by_path),
        )
        .route("/managers/delete/{id}", post(delete_manager))
}
