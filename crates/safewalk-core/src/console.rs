//! The admin console read model.
//!
//! Built by reading every collection in full; refreshing is simply building
//! it again.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{
  Result,
  alert::SosAlert,
  community::{CommunityFilter, CommunitySubmission},
  counters::UsageCounters,
  records::RecordStore,
  report::{IncidentReport, IncidentType, ReportStatus},
  store::KeyValueStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeCount {
  #[serde(rename = "type")]
  pub kind:  IncidentType,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleStats {
  pub total_reports:   usize,
  /// Suspicious-activity and harassment reports.
  pub high_risk:       usize,
  pub pending:         usize,
  pub resolved:        usize,
  pub by_type:         Vec<TypeCount>,
  pub total_alerts:    usize,
  pub alerts_last_24h: usize,
  pub community_posts: usize,
}

impl ConsoleStats {
  pub fn derive(
    reports: &[IncidentReport],
    alerts: &[SosAlert],
    community: &[CommunitySubmission],
    now: DateTime<Utc>,
  ) -> Self {
    let count_status =
      |status: ReportStatus| reports.iter().filter(|r| r.status == status).count();
    let since = now - Duration::hours(24);
    Self {
      total_reports:   reports.len(),
      high_risk:       reports.iter().filter(|r| r.kind.is_high_risk()).count(),
      pending:         count_status(ReportStatus::Pending),
      resolved:        count_status(ReportStatus::Resolved),
      by_type:         IncidentType::iter()
        .map(|kind| TypeCount {
          kind,
          count: reports.iter().filter(|r| r.kind == kind).count(),
        })
        .collect(),
      total_alerts:    alerts.len(),
      alerts_last_24h: alerts.iter().filter(|a| a.created_at >= since).count(),
      community_posts: community.len(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminOverview {
  pub stats:     ConsoleStats,
  pub counters:  UsageCounters,
  pub reports:   Vec<IncidentReport>,
  /// Newest first.
  pub alerts:    Vec<SosAlert>,
  pub community: Vec<CommunitySubmission>,
}

impl AdminOverview {
  pub async fn load<S: KeyValueStore>(
    records: &RecordStore<S>,
    filter: CommunityFilter,
    now: DateTime<Utc>,
  ) -> Result<Self> {
    let reports = records.reports().list().await?;
    let mut alerts = records.alerts().list().await?;
    let community = records.community().list(CommunityFilter::All).await?;
    let counters = records.counters().get().await?;

    let stats = ConsoleStats::derive(&reports, &alerts, &community, now);
    alerts.reverse();

    Ok(Self {
      stats,
      counters,
      reports,
      alerts,
      community: filter.apply(community),
    })
  }
}
