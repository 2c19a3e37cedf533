//! Community feed submissions (stories and incidents).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::alert::UserSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubmissionKind {
  Story,
  Incident,
}

/// Feed filter used by the dashboard and the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunityFilter {
  #[default]
  All,
  Story,
  Incident,
}

impl CommunityFilter {
  pub fn matches(self, kind: SubmissionKind) -> bool {
    match self {
      Self::All => true,
      Self::Story => kind == SubmissionKind::Story,
      Self::Incident => kind == SubmissionKind::Incident,
    }
  }

  /// Keep matching submissions, preserving their order.
  pub fn apply(
    self,
    mut items: Vec<CommunitySubmission>,
  ) -> Vec<CommunitySubmission> {
    items.retain(|s| self.matches(s.kind));
    items
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunitySubmission {
  pub id:         i64,
  #[serde(rename = "type")]
  pub kind:       SubmissionKind,
  pub content:    String,
  pub user:       UserSnapshot,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::records::Community::append`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCommunitySubmission {
  #[serde(rename = "type")]
  pub kind:    SubmissionKind,
  pub content: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn item(id: i64, kind: SubmissionKind) -> CommunitySubmission {
    CommunitySubmission {
      id,
      kind,
      content: format!("post {id}"),
      user: UserSnapshot { name: "n".into(), email: "e@example.com".into() },
      created_at: Utc::now(),
    }
  }

  #[test]
  fn filter_story_keeps_only_stories_in_order() {
    let items = vec![
      item(1, SubmissionKind::Story),
      item(2, SubmissionKind::Incident),
      item(3, SubmissionKind::Story),
    ];
    let ids: Vec<_> = CommunityFilter::Story
      .apply(items.clone())
      .iter()
      .map(|s| s.id)
      .collect();
    assert_eq!(ids, [1, 3]);
    assert_eq!(CommunityFilter::All.apply(items.clone()), items);
  }
}
