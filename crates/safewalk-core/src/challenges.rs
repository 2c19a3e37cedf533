//! Safety challenges: a fixed catalogue with points and a completion score.
//!
//! The incident challenge completes itself once this device holds any
//! report. The others complete when the user acknowledges them; those
//! acknowledgements live with the client and are passed in.

use serde::Serialize;

use crate::{Result, records::RecordStore, store::KeyValueStore};

/// Id of the challenge completed by submitting a report.
pub const INCIDENT_CHALLENGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Challenge {
  pub id:          u32,
  pub title:       &'static str,
  pub description: &'static str,
  pub points:      u32,
  pub difficulty:  Difficulty,
}

pub const CHALLENGES: &[Challenge] = &[
  Challenge {
    id:          INCIDENT_CHALLENGE,
    title:       "Incident Reporting",
    description: "Submit an incident report or share your story in the Community section.",
    points:      50,
    difficulty:  Difficulty::Easy,
  },
  Challenge {
    id:          2,
    title:       "Safety Awareness",
    description: "Review and acknowledge key safety tips and precautions.",
    points:      30,
    difficulty:  Difficulty::Easy,
  },
  Challenge {
    id:          4,
    title:       "Safety Education",
    description: "Complete the safety education module and pass the quiz.",
    points:      60,
    difficulty:  Difficulty::Medium,
  },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeStatus {
  #[serde(flatten)]
  pub challenge: Challenge,
  pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeProgress {
  pub challenges:         Vec<ChallengeStatus>,
  pub earned_points:      u32,
  pub total_points:       u32,
  /// Completed challenges as a rounded percentage of the catalogue.
  pub completion_percent: u32,
}

impl ChallengeProgress {
  /// Ids in `acknowledged` that are not in the catalogue are ignored.
  pub fn derive(has_reports: bool, acknowledged: &[u32]) -> Self {
    let challenges: Vec<_> = CHALLENGES
      .iter()
      .map(|&challenge| ChallengeStatus {
        challenge,
        completed: acknowledged.contains(&challenge.id)
          || (challenge.id == INCIDENT_CHALLENGE && has_reports),
      })
      .collect();

    let done = challenges.iter().filter(|c| c.completed).count() as u32;
    let count = challenges.len() as u32;
    Self {
      earned_points: challenges
        .iter()
        .filter(|c| c.completed)
        .map(|c| c.challenge.points)
        .sum(),
      total_points: CHALLENGES.iter().map(|c| c.points).sum(),
      completion_percent: (done * 100 + count / 2) / count.max(1),
      challenges,
    }
  }

  pub async fn load<S: KeyValueStore>(
    records: &RecordStore<S>,
    acknowledged: &[u32],
  ) -> Result<Self> {
    let has_reports = !records.reports().list().await?.is_empty();
    Ok(Self::derive(has_reports, acknowledged))
  }
}
