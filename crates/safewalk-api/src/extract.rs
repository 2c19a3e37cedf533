//! Body and query extractors that reject in the API's JSON error shape.
//!
//! axum's own [`Json`] and [`Query`] answer malformed input with a plain-text
//! body; these wrappers turn every rejection into [`ApiError::Validation`].

use axum::{
  Json,
  body::Bytes,
  extract::{
    FromRequest, FromRequestParts, OptionalFromRequest, Query, Request,
    rejection::{JsonRejection, QueryRejection},
  },
  http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A required JSON body.
///
/// As `Option<ApiJson<T>>` the body becomes optional: an empty or
/// whitespace-only body yields `None`, anything else must parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
    Ok(Self(value))
  }
}

impl<T, S> OptionalFromRequest<S> for ApiJson<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(
    req: Request,
    state: &S,
  ) -> Result<Option<Self>, Self::Rejection> {
    let bytes = <Bytes as FromRequest<S>>::from_request(req, state)
      .await
      .map_err(|e| ApiError::Validation(e.body_text()))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
      return Ok(None);
    }
    serde_json::from_slice(&bytes)
      .map(|value| Some(Self(value)))
      .map_err(|e| ApiError::Validation(format!("invalid JSON body: {e}")))
  }
}

/// Query-string parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Query(value) =
      <Query<T> as FromRequestParts<S>>::from_request_parts(parts, state).await?;
    Ok(Self(value))
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::Validation(rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::Validation(rejection.body_text())
  }
}
