//! Error types for `safewalk-core`.

use thiserror::Error;

use crate::flow::FlowError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("incident report not found: {0}")]
  ReportNotFound(i64),

  #[error("invalid submission: {0}")]
  Validation(#[from] FlowError),

  #[error("no match for place: {0:?}")]
  PlaceNotFound(String),

  #[error("geocoding error: {0}")]
  Geocoding(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Box a backend error into [`Error::Store`].
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
