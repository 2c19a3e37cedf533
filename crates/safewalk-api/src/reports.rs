//! Handlers for `/reports`.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/reports` | All reports on this device plus the banner flag |
//! | `POST`   | `/reports` | Body: `{"type","description","location","urgency"}`; 201 with the report and form timings |
//! | `DELETE` | `/reports/banner` | Hide the submitted-reports banner; 204 |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use safewalk_core::{
  flow::{CLOSE_RESET_DELAY, ReportDraft, SUCCESS_DWELL},
  report::{IncidentReport, IncidentType, Urgency},
  store::KeyValueStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, auth::UserSession, error::ApiError, extract::ApiJson};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ReportList {
  pub reports:        Vec<IncidentReport>,
  pub banner_visible: bool,
}

/// `GET /reports`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  _session: UserSession,
) -> Result<Json<ReportList>, ApiError>
where
  S: KeyValueStore,
{
  let reports = state.records.reports();
  Ok(Json(ReportList {
    banner_visible: reports.banner_visible().await?,
    reports:        reports.list().await?,
  }))
}

// ─── Submit ──────────────────────────────────────────────────────────────────

/// The filled-in report form. Omitted fields take the form's defaults.
#[derive(Debug, Deserialize)]
pub struct ReportForm {
  #[serde(rename = "type", default)]
  pub kind:                 IncidentType,
  #[serde(default)]
  pub description:          String,
  #[serde(default)]
  pub location:             String,
  /// Fill the location with the current-location placeholder.
  #[serde(default)]
  pub use_current_location: bool,
  #[serde(default)]
  pub urgency:              Urgency,
}

impl ReportForm {
  fn into_draft(self) -> ReportDraft {
    let mut draft = ReportDraft::new();
    draft.kind = self.kind;
    draft.description = self.description;
    draft.location = self.location;
    draft.urgency = self.urgency;
    if self.use_current_location {
      draft.use_current_location();
    }
    draft
  }
}

#[derive(Debug, Serialize)]
pub struct ReportReceipt {
  #[serde(flatten)]
  pub report:         IncidentReport,
  /// How long the form shows its success state before resetting.
  pub dwell_ms:       u64,
  /// Delay between closing the form and clearing its fields.
  pub reset_delay_ms: u64,
}

/// `POST /reports`
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  _session: UserSession,
  ApiJson(form): ApiJson<ReportForm>,
) -> Result<impl IntoResponse, ApiError>
where
  S: KeyValueStore,
{
  let (mut draft, new) = form.into_draft().complete()?;
  let report = state.records.reports().append(new).await?;
  draft.succeed()?;
  Ok((
    StatusCode::CREATED,
    Json(ReportReceipt {
      report,
      dwell_ms: SUCCESS_DWELL.as_millis() as u64,
      reset_delay_ms: CLOSE_RESET_DELAY.as_millis() as u64,
    }),
  ))
}

// ─── Banner ──────────────────────────────────────────────────────────────────

/// `DELETE /reports/banner`
pub async fn dismiss_banner<S>(
  State(state): State<AppState<S>>,
  _session: UserSession,
) -> Result<StatusCode, ApiError>
where
  S: KeyValueStore,
{
  state.records.reports().dismiss_banner().await?;
  Ok(StatusCode::NO_CONTENT)
}
