//! Landing page

use axum::{response::Html, routing::get, Router};

use crate::views;

/// GET /
async fn home() -> Html<String> {
    Html(views::home())
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}
