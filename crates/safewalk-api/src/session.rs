//! Handlers for `/session`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/session[?path=/x]` | Render state and gate decision; never rejects |
//! | `POST` | `/session` | Session establishment; counts usage, returns the landing path |

use axum::{Json, extract::State};
use safewalk_core::{
  alert::UserSnapshot,
  counters::UsageCounters,
  session::{ENTRY_PATH, GateDecision, RenderState, Role, gate},
  store::KeyValueStore,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
  AppState,
  auth::{CurrentSession, SignedIn},
  error::ApiError,
  extract::ApiQuery,
};

// ─── Current ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GateParams {
  pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
  pub render_state: RenderState,
  pub role:         Role,
  pub user:         Option<UserSnapshot>,
  pub path:         String,
  pub gate:         GateDecision,
}

/// `GET /session[?path=<path>]`
pub async fn current(
  CurrentSession(session): CurrentSession,
  ApiQuery(params): ApiQuery<GateParams>,
) -> Json<SessionView> {
  let path = params.path.unwrap_or_else(|| ENTRY_PATH.to_owned());
  Json(SessionView {
    render_state: session.render_state(),
    role:         session.role,
    user:         session.identity.as_ref().map(|i| UserSnapshot::capture(Some(i))),
    gate:         gate(&session, &path),
    path,
  })
}

// ─── Establish ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Established {
  pub render_state: RenderState,
  pub landing:      &'static str,
  pub counters:     UsageCounters,
}

/// `POST /session`
pub async fn establish<S>(
  State(state): State<AppState<S>>,
  SignedIn(session): SignedIn,
) -> Result<Json<Established>, ApiError>
where
  S: KeyValueStore,
{
  let Some(identity) = session.identity.as_ref() else {
    return Err(ApiError::Unauthorized);
  };
  let counters = state.records.counters().record_session(identity).await?;
  let render_state = session.render_state();
  info!(uid = %identity.uid, role = ?session.role, "session established");
  Ok(Json(Established {
    render_state,
    landing: render_state.landing_path(),
    counters,
  }))
}
