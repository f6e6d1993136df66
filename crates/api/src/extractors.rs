//! Extractors that reject with [`AppError`] instead of axum's plain-text
//! rejections, so malformed ids and bodies get the JSON error envelope.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use devboard_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A numeric `{id}` path segment.
pub struct ValidId(pub DbId);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        let id = raw
            .parse::<DbId>()
            .map_err(|_| AppError::BadRequest(format!("invalid id '{raw}'")))?;

        Ok(Self(id))
    }
}

/// A JSON request body.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}
