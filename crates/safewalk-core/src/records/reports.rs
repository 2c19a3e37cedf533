//! Incident report repository.

use chrono::Utc;
use tracing::info;

use super::{Record, RecordStore};
use crate::{
  Error, Result,
  report::{IncidentReport, NewIncidentReport, ReportStatus},
  store::{Key, KeyValueStore},
};

impl Record for IncidentReport {
  fn id(&self) -> i64 { self.id }
}

pub struct Reports<'a, S> {
  pub(super) records: &'a RecordStore<S>,
}

impl<S: KeyValueStore> Reports<'_, S> {
  /// All reports in submission order.
  pub async fn list(&self) -> Result<Vec<IncidentReport>> {
    self.records.load(Key::IncidentReports).await
  }

  /// Store a new `pending` report and re-show the submitted-reports banner.
  pub async fn append(&self, input: NewIncidentReport) -> Result<IncidentReport> {
    let _guard = self.records.lock().await;
    let report = self
      .records
      .append_locked(Key::IncidentReports, |id| IncidentReport {
        id,
        kind: input.kind,
        description: input.description,
        location: input.location,
        urgency: input.urgency,
        status: ReportStatus::Pending,
        created_at: Utc::now(),
      })
      .await?;
    self.records.clear(Key::ReportBannerHidden).await?;
    info!(report_id = report.id, kind = %report.kind, "incident report stored");
    Ok(report)
  }

  /// Set the status of exactly one report. Every other record is written
  /// back unchanged.
  pub async fn update_status(
    &self,
    id: i64,
    status: ReportStatus,
  ) -> Result<IncidentReport> {
    let _guard = self.records.lock().await;
    let mut reports: Vec<IncidentReport> =
      self.records.load(Key::IncidentReports).await?;
    let target = reports
      .iter_mut()
      .find(|r| r.id == id)
      .ok_or(Error::ReportNotFound(id))?;
    let previous = target.status;
    target.status = status;
    let updated = target.clone();
    self.records.save(Key::IncidentReports, &reports).await?;
    info!(report_id = id, from = %previous, to = %status, "report status changed");
    Ok(updated)
  }

  /// Whether the dashboard should show the submitted-reports banner.
  pub async fn banner_visible(&self) -> Result<bool> {
    let hidden: bool = self.records.load(Key::ReportBannerHidden).await?;
    if hidden {
      return Ok(false);
    }
    Ok(!self.list().await?.is_empty())
  }

  /// Hide the banner until the next submission. Reports are kept.
  pub async fn dismiss_banner(&self) -> Result<()> {
    let _guard = self.records.lock().await;
    self.records.save(Key::ReportBannerHidden, &true).await
  }
}
