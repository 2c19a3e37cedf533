//! Handlers for `/admin`. Every route requires the administrator session.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/admin/overview` | All collections, counters and derived stats; `?type=` filters community |
//! | `POST` | `/admin/reports/:id/status` | Body: `{"status":"resolved"}`; 404 if not found |
//! | `GET`  | `/admin/community` | Optional `?type=all\|story\|incident` |

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::Utc;
use safewalk_core::{
  community::CommunitySubmission,
  console::AdminOverview,
  report::{IncidentReport, ReportStatus},
  store::KeyValueStore,
};
use serde::Deserialize;

use crate::{
  AppState,
  auth::AdminSession,
  community::FilterParams,
  error::ApiError,
  extract::{ApiJson, ApiQuery},
};

/// `GET /admin/overview[?type=<filter>]`
pub async fn overview<S>(
  State(state): State<AppState<S>>,
  _session: AdminSession,
  ApiQuery(params): ApiQuery<FilterParams>,
) -> Result<Json<AdminOverview>, ApiError>
where
  S: KeyValueStore,
{
  let overview = AdminOverview::load(state.records.as_ref(), params.filter, Utc::now()).await?;
  Ok(Json(overview))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: ReportStatus,
}

/// `POST /admin/reports/:id/status`
pub async fn set_status<S>(
  State(state): State<AppState<S>>,
  _session: AdminSession,
  Path(id): Path<i64>,
  ApiJson(body): ApiJson<StatusBody>,
) -> Result<Json<IncidentReport>, ApiError>
where
  S: KeyValueStore,
{
  let report = state.records.reports().update_status(id, body.status).await?;
  Ok(Json(report))
}

/// `GET /admin/community[?type=<filter>]`
pub async fn community<S>(
  State(state): State<AppState<S>>,
  _session: AdminSession,
  ApiQuery(params): ApiQuery<FilterParams>,
) -> Result<Json<Vec<CommunitySubmission>>, ApiError>
where
  S: KeyValueStore,
{
  Ok(Json(state.records.community().list(params.filter).await?))
}
