//! Submission flows.
//!
//! Every flow moves through [`SubmissionPhase`]: input is collected, the side
//! effect runs while `Submitting`, and the flow rests in `Succeeded` for
//! [`SUCCESS_DWELL`] before resetting. The incident report additionally walks
//! four input steps, each of which must be satisfied before moving forward.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::{IncidentType, NewIncidentReport, Urgency};

/// Placeholder location set by the "use current location" shortcut.
pub const CURRENT_LOCATION: &str = "Current Location";

/// How long a successful submission stays on screen before the flow resets.
pub const SUCCESS_DWELL: Duration = Duration::from_secs(2);

/// Delay between closing a flow and clearing its fields.
pub const CLOSE_RESET_DELAY: Duration = Duration::from_millis(300);

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A validation failure that blocks forward progress. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
  #[error("please provide a description")]
  MissingDescription,

  #[error("please provide a location")]
  MissingLocation,

  #[error("please write something to share")]
  EmptyContent,

  #[error("please select a city and enter a destination")]
  MissingRoute,

  #[error("urgency must be between 1 and 5, got {0}")]
  UrgencyOutOfRange(u8),

  #[error("cannot {action} while {phase:?}")]
  WrongPhase {
    action: &'static str,
    phase:  SubmissionPhase,
  },

  #[error("the report can only be submitted from the review step")]
  NotReviewed,
}

// ─── Phase ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPhase {
  #[default]
  Collecting,
  Submitting,
  Succeeded,
}

impl SubmissionPhase {
  /// `Collecting → Submitting`.
  pub fn begin(&mut self) -> Result<(), FlowError> {
    match self {
      Self::Collecting => {
        *self = Self::Submitting;
        Ok(())
      }
      other => Err(FlowError::WrongPhase { action: "submit", phase: *other }),
    }
  }

  /// `Submitting → Succeeded`.
  pub fn finish(&mut self) -> Result<(), FlowError> {
    match self {
      Self::Submitting => {
        *self = Self::Succeeded;
        Ok(())
      }
      other => Err(FlowError::WrongPhase { action: "finish", phase: *other }),
    }
  }

  pub fn reset(&mut self) { *self = Self::Collecting; }
}

// ─── Incident report draft ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStep {
  Type,
  Details,
  Location,
  Review,
}

impl ReportStep {
  fn next(self) -> Self {
    match self {
      Self::Type => Self::Details,
      Self::Details => Self::Location,
      Self::Location | Self::Review => Self::Review,
    }
  }

  fn prev(self) -> Self {
    match self {
      Self::Type | Self::Details => Self::Type,
      Self::Location => Self::Details,
      Self::Review => Self::Location,
    }
  }
}

/// The multi-step incident report form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
  pub kind:        IncidentType,
  pub description: String,
  pub location:    String,
  pub urgency:     Urgency,
  step:            ReportStep,
  phase:           SubmissionPhase,
}

impl Default for ReportDraft {
  fn default() -> Self {
    Self {
      kind:        IncidentType::default(),
      description: String::new(),
      location:    String::new(),
      urgency:     Urgency::default(),
      step:        ReportStep::Type,
      phase:       SubmissionPhase::Collecting,
    }
  }
}

impl ReportDraft {
  pub fn new() -> Self { Self::default() }

  pub fn step(&self) -> ReportStep { self.step }

  pub fn phase(&self) -> SubmissionPhase { self.phase }

  pub fn use_current_location(&mut self) {
    self.location = CURRENT_LOCATION.to_owned();
  }

  /// Move to the next step if the current one is satisfied.
  pub fn advance(&mut self) -> Result<ReportStep, FlowError> {
    self.ensure_collecting("advance")?;
    match self.step {
      ReportStep::Details if self.description.trim().is_empty() => {
        return Err(FlowError::MissingDescription);
      }
      ReportStep::Location if self.location.trim().is_empty() => {
        return Err(FlowError::MissingLocation);
      }
      _ => {}
    }
    self.step = self.step.next();
    Ok(self.step)
  }

  /// Step back; never blocked by validation.
  pub fn back(&mut self) -> ReportStep {
    self.step = self.step.prev();
    self.step
  }

  /// Enter `Submitting` and hand out the record to persist.
  pub fn begin_submit(&mut self) -> Result<NewIncidentReport, FlowError> {
    self.ensure_collecting("submit")?;
    if self.step != ReportStep::Review {
      return Err(FlowError::NotReviewed);
    }
    self.phase.begin()?;
    Ok(NewIncidentReport {
      kind:        self.kind,
      description: self.description.trim().to_owned(),
      location:    self.location.trim().to_owned(),
      urgency:     self.urgency,
    })
  }

  /// Mark the persisted submission as successful.
  pub fn succeed(&mut self) -> Result<(), FlowError> { self.phase.finish() }

  /// Clear every field and return to the first step.
  pub fn reset(&mut self) { *self = Self::default(); }

  /// Drive a fully-filled draft through every step and begin submission.
  pub fn complete(mut self) -> Result<(Self, NewIncidentReport), FlowError> {
    while self.step != ReportStep::Review {
      self.advance()?;
    }
    let report = self.begin_submit()?;
    Ok((self, report))
  }

  fn ensure_collecting(&self, action: &'static str) -> Result<(), FlowError> {
    if self.phase == SubmissionPhase::Collecting {
      Ok(())
    } else {
      Err(FlowError::WrongPhase { action, phase: self.phase })
    }
  }
}
