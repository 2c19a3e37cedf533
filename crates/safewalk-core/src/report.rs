//! Incident reports, the main user-submitted record.
//!
//! A report is created by the report flow with status `pending`. Only an
//! administrator changes its status afterwards; nothing else about a stored
//! report ever changes, and reports are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::flow::FlowError;

// ─── Classification ──────────────────────────────────────────────────────────

/// What kind of incident is being reported.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncidentType {
  Harassment,
  Theft,
  Assault,
  /// Pre-selected when the report flow opens.
  #[default]
  Suspicious,
  Other,
}

impl IncidentType {
  /// Types the admin console counts as high-risk.
  pub fn is_high_risk(self) -> bool {
    matches!(self, Self::Suspicious | Self::Harassment)
  }
}

/// Review status; set to `Pending` on creation and changed only by an
/// administrator.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportStatus {
  #[default]
  Pending,
  Investigating,
  Resolved,
  Dismissed,
}

// ─── Urgency ─────────────────────────────────────────────────────────────────

/// Reporter-assessed urgency on a 1–5 scale.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Urgency(u8);

impl Urgency {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 5;

  pub fn new(value: u8) -> Result<Self, FlowError> {
    if (Self::MIN..=Self::MAX).contains(&value) {
      Ok(Self(value))
    } else {
      Err(FlowError::UrgencyOutOfRange(value))
    }
  }

  pub fn get(self) -> u8 { self.0 }
}

impl Default for Urgency {
  fn default() -> Self { Self(3) }
}

impl TryFrom<u8> for Urgency {
  type Error = FlowError;

  fn try_from(value: u8) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Urgency> for u8 {
  fn from(u: Urgency) -> Self { u.0 }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A stored incident report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentReport {
  /// Creation-time timestamp in milliseconds; unique within the collection.
  pub id:          i64,
  #[serde(rename = "type")]
  pub kind:        IncidentType,
  pub description: String,
  /// Free text; may be the [`crate::flow::CURRENT_LOCATION`] placeholder.
  pub location:    String,
  pub urgency:     Urgency,
  #[serde(default)]
  pub status:      ReportStatus,
  /// Never changes after creation.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::records::Reports::append`]. `id`, `status` and
/// `created_at` are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncidentReport {
  pub kind:        IncidentType,
  pub description: String,
  pub location:    String,
  pub urgency:     Urgency,
}
