//! Handlers for `/assistant`.
//!
//! The assistant is stateless on the server: the client sends the transcript
//! it holds and receives it back with the new turn appended.

use axum::Json;
use safewalk_core::assistant::{
  FEATURES, Feature, Message, Sender, Transcript, feature_by_title, typing_delay,
};
use serde::{Deserialize, Serialize};

use crate::{auth::UserSession, error::ApiError, extract::ApiJson};

#[derive(Debug, Deserialize)]
pub struct TurnRequest {
  /// The conversation so far; omitted starts a fresh one.
  #[serde(default)]
  pub transcript: Option<Transcript>,
  /// Free text typed by the user.
  #[serde(default)]
  pub message:    Option<String>,
  /// A feature shortcut, by title. Takes precedence over `message`.
  #[serde(default)]
  pub feature:    Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
  pub transcript:      Transcript,
  pub added:           Vec<Message>,
  pub typing_delay_ms: u64,
}

/// `POST /assistant`
pub async fn turn(
  _session: UserSession,
  ApiJson(body): ApiJson<TurnRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
  let mut transcript = body.transcript.unwrap_or_default();
  let added = match (body.feature.as_deref(), body.message.as_deref()) {
    (Some(title), _) => {
      let feature = feature_by_title(title)
        .ok_or_else(|| ApiError::NotFound(format!("assistant feature {title:?}")))?;
      transcript.choose(feature).to_vec()
    }
    (None, Some(message)) => transcript.send(message).to_vec(),
    (None, None) => {
      return Err(ApiError::Validation(
        "send a message or choose a feature".to_owned(),
      ));
    }
  };

  let typing_delay_ms = added
    .iter()
    .find(|m| m.sender == Sender::Bot)
    .map(|m| typing_delay(&m.content).as_millis() as u64)
    .unwrap_or_default();

  Ok(Json(TurnResponse { transcript, added, typing_delay_ms }))
}

/// `GET /assistant/features`
pub async fn features(_session: UserSession) -> Json<&'static [Feature]> {
  Json(FEATURES)
}
