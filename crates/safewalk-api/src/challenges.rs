//! Handlers for `/challenges`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/challenges` | Progress from stored reports alone |
//! | `POST` | `/challenges` | Body: `{"acknowledged":[2,4]}`, the ids the user has confirmed |

use axum::{Json, extract::State};
use safewalk_core::{challenges::ChallengeProgress, store::KeyValueStore};
use serde::Deserialize;

use crate::{AppState, auth::UserSession, error::ApiError, extract::ApiJson};

#[derive(Debug, Deserialize)]
pub struct Acknowledged {
  #[serde(default)]
  pub acknowledged: Vec<u32>,
}

/// `GET /challenges`
pub async fn progress<S>(
  State(state): State<AppState<S>>,
  _session: UserSession,
) -> Result<Json<ChallengeProgress>, ApiError>
where
  S: KeyValueStore,
{
  Ok(Json(ChallengeProgress::load(state.records.as_ref(), &[]).await?))
}

/// `POST /challenges`
pub async fn acknowledge<S>(
  State(state): State<AppState<S>>,
  _session: UserSession,
  ApiJson(body): ApiJson<Acknowledged>,
) -> Result<Json<ChallengeProgress>, ApiError>
where
  S: KeyValueStore,
{
  let progress = ChallengeProgress::load(state.records.as_ref(), &body.acknowledged).await?;
  Ok(Json(progress))
}
