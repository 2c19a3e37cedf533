//! SOS alerts and the denormalised user snapshot shared with community posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Identity;

/// Email recorded when the alerting user has none.
pub const ANONYMOUS_EMAIL: &str = "anonymous@example.com";

/// Who created a record, captured at creation time and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
  pub name:  String,
  pub email: String,
}

impl UserSnapshot {
  pub fn capture(identity: Option<&Identity>) -> Self {
    match identity {
      Some(id) => Self {
        name:  id.short_name(),
        email: id.email.clone().unwrap_or_else(|| ANONYMOUS_EMAIL.to_owned()),
      },
      None => Self {
        name:  "Anonymous".to_owned(),
        email: ANONYMOUS_EMAIL.to_owned(),
      },
    }
  }
}

/// Where an SOS was raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertLocation {
  pub name:      String,
  pub latitude:  f64,
  pub longitude: f64,
}

impl AlertLocation {
  /// Used when the device supplies no position of its own.
  pub fn fallback() -> Self {
    Self {
      name:      "Mangalore Institute of Technology & Engineering, Moodabidri".to_owned(),
      latitude:  13.0954,
      longitude: 74.9965,
    }
  }

  pub fn maps_url(&self) -> String {
    format!(
      "https://www.google.com/maps?q={},{}",
      self.latitude, self.longitude
    )
  }
}

/// A stored SOS alert. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SosAlert {
  pub id:         i64,
  /// Human-readable summary embedding the location.
  pub content:    String,
  pub user:       UserSnapshot,
  pub location:   AlertLocation,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::records::Alerts::append`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewSosAlert {
  pub user:     UserSnapshot,
  pub location: AlertLocation,
}

impl NewSosAlert {
  pub fn summary(&self) -> String {
    format!(
      "SOS Alert triggered at {} ({}, {})",
      self.location.name, self.location.latitude, self.location.longitude
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn summary_embeds_location() {
    let alert = NewSosAlert {
      user:     UserSnapshot::capture(None),
      location: AlertLocation {
        name:      "Hampankatta".into(),
        latitude:  12.87,
        longitude: 74.84,
      },
    };
    assert_eq!(alert.summary(), "SOS Alert triggered at Hampankatta (12.87, 74.84)");
  }

  #[test]
  fn snapshot_falls_back_for_missing_email() {
    let id = Identity {
      uid:          "u1".into(),
      email:        None,
      display_name: Some("Meera".into()),
    };
    let snap = UserSnapshot::capture(Some(&id));
    assert_eq!(snap.name, "Meera");
    assert_eq!(snap.email, ANONYMOUS_EMAIL);
  }

  #[test]
  fn maps_url() {
    assert_eq!(
      AlertLocation::fallback().maps_url(),
      "https://www.google.com/maps?q=13.0954,74.9965"
    );
  }
}
