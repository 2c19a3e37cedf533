//! Handlers for `/community`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/community` | Optional `?type=all\|story\|incident` |
//! | `POST` | `/community` | Body: `{"type":"story","content":"..."}`; 201 |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use safewalk_core::{
  alert::UserSnapshot,
  community::{CommunityFilter, CommunitySubmission, NewCommunitySubmission},
  store::KeyValueStore,
};
use serde::Deserialize;

use crate::{
  AppState,
  auth::UserSession,
  error::ApiError,
  extract::{ApiJson, ApiQuery},
};

#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
  #[serde(rename = "type", default)]
  pub filter: CommunityFilter,
}

/// `GET /community[?type=<filter>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  _session: UserSession,
  ApiQuery(params): ApiQuery<FilterParams>,
) -> Result<Json<Vec<CommunitySubmission>>, ApiError>
where
  S: KeyValueStore,
{
  Ok(Json(state.records.community().list(params.filter).await?))
}

/// `POST /community`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  UserSession(session): UserSession,
  ApiJson(body): ApiJson<NewCommunitySubmission>,
) -> Result<impl IntoResponse, ApiError>
where
  S: KeyValueStore,
{
  let user = UserSnapshot::capture(session.identity.as_ref());
  let submission = state.records.community().append(user, body).await?;
  Ok((StatusCode::CREATED, Json(submission)))
}
