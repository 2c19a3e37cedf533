//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use safewalk_core::flow::FlowError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("authentication required")]
  Unauthorized,

  /// The session gate sent this session elsewhere.
  #[error("forbidden; continue at {redirect}")]
  Forbidden { redirect: &'static str },

  #[error("not found: {0}")]
  NotFound(String),

  #[error("{0}")]
  Validation(String),

  #[error("upstream service error: {0}")]
  External(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<safewalk_core::Error> for ApiError {
  fn from(e: safewalk_core::Error) -> Self {
    use safewalk_core::Error as Core;
    match e {
      Core::ReportNotFound(_) | Core::PlaceNotFound(_) => {
        ApiError::NotFound(e.to_string())
      }
      Core::Validation(flow) => ApiError::Validation(flow.to_string()),
      Core::Geocoding(inner) => ApiError::External(inner.to_string()),
      Core::Store(inner) => ApiError::Store(inner),
      Core::Serialization(inner) => ApiError::Store(Box::new(inner)),
    }
  }
}

impl From<FlowError> for ApiError {
  fn from(e: FlowError) -> Self { ApiError::Validation(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::Unauthorized => {
        (StatusCode::UNAUTHORIZED, json!({ "error": self.to_string() }))
      }
      ApiError::Forbidden { redirect } => (
        StatusCode::FORBIDDEN,
        json!({ "error": "forbidden", "redirect": redirect }),
      ),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::Validation(m) => {
        (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": m }))
      }
      ApiError::External(m) => (StatusCode::BAD_GATEWAY, json!({ "error": m })),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
      }
    };

    let mut res = (status, Json(body)).into_response();
    if matches!(self, ApiError::Unauthorized) {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"safewalk\""),
      );
    }
    res
  }
}
