//! Custom Axum extractors

use axum::extract::{Form, FromRequest, Request};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// URL-encoded form body; a missing content type or an undecodable body
/// is answered with the JSON error shape instead of axum's plain text.
pub struct ValidForm<T>(pub T);

impl<S, T> FromRequest<S> for ValidForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
