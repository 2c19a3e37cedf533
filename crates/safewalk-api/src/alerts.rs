//! Handler for `POST /alerts`, the SOS button.
//!
//! The alert is stored before the email is attempted. A failed email still
//! answers 201; the body's `delivery` field says what happened.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use safewalk_core::{
  alert::AlertLocation,
  sos::{self, SOS_COUNTDOWN, SosOutcome},
  store::KeyValueStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, auth::UserSession, error::ApiError, extract::ApiJson};

#[derive(Debug, Default, Deserialize)]
pub struct AlertRequest {
  /// Where the user is. Omitted means the fixed default location.
  #[serde(default)]
  pub location: Option<AlertLocation>,
}

#[derive(Debug, Serialize)]
pub struct AlertResponse {
  #[serde(flatten)]
  pub outcome:        SosOutcome,
  /// Seconds to count down before opening the emergency page.
  pub countdown_secs: u64,
}

/// `POST /alerts`, with no body, `{}`, or
/// `{"location":{"name","latitude","longitude"}}`
pub async fn activate<S>(
  State(state): State<AppState<S>>,
  UserSession(session): UserSession,
  body: Option<ApiJson<AlertRequest>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: KeyValueStore,
{
  let outcome = sos::activate(
    state.records.as_ref(),
    state.notifier.as_ref(),
    session.identity.as_ref(),
    body.and_then(|ApiJson(body)| body.location),
  )
  .await?;
  Ok((
    StatusCode::CREATED,
    Json(AlertResponse { outcome, countdown_secs: SOS_COUNTDOWN.as_secs() }),
  ))
}
