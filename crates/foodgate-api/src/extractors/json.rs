//! JSON body extractor that reports bad bodies in the standard error shape.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use foodgate_core::AppError;

use crate::error::ApiError;

/// Like [`Json`], but a missing field, malformed JSON or wrong content type
/// is a 400 `VALIDATION_ERROR` rather than axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            AppError::validation(format!("Invalid request body: {}", rejection.body_text()))
        })?;
        Ok(Self(value))
    }
}
