//! SOS activation: commit the alert, then notify.
//!
//! The alert record is written before the email is attempted and is never
//! rolled back. Delivery failure is logged and reported to the caller only.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::{
  Result,
  alert::{AlertLocation, NewSosAlert, SosAlert, UserSnapshot},
  notify::{AlertEmail, AlertNotifier},
  records::RecordStore,
  session::Identity,
  store::KeyValueStore,
};

/// Countdown shown before the emergency instructions page opens.
pub const SOS_COUNTDOWN: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Delivery {
  Sent,
  Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SosOutcome {
  pub alert:    SosAlert,
  pub delivery: Delivery,
}

pub async fn activate<S, N>(
  records: &RecordStore<S>,
  notifier: &N,
  identity: Option<&Identity>,
  location: Option<AlertLocation>,
) -> Result<SosOutcome>
where
  S: KeyValueStore,
  N: AlertNotifier,
{
  let alert = records
    .alerts()
    .append(NewSosAlert {
      user:     UserSnapshot::capture(identity),
      location: location.unwrap_or_else(AlertLocation::fallback),
    })
    .await?;
  info!(alert_id = alert.id, user = %alert.user.email, "sos alert recorded");

  let email = AlertEmail::for_alert(&alert, identity);
  let delivery = match notifier.send(&email).await {
    Ok(()) => Delivery::Sent,
    Err(e) => {
      warn!(alert_id = alert.id, error = %e, "sos email delivery failed");
      Delivery::Failed { reason: e.to_string() }
    }
  };

  Ok(SosOutcome { alert, delivery })
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  };

  use super::*;
  use crate::store::MemoryStore;

  #[derive(Debug, thiserror::Error)]
  #[error("service unavailable")]
  struct Unavailable;

  #[derive(Default)]
  struct Recording {
    sent: Mutex<Vec<AlertEmail>>,
  }

  impl AlertNotifier for Recording {
    type Error = Unavailable;

    async fn send(&self, email: &AlertEmail) -> Result<(), Unavailable> {
      self.sent.lock().unwrap().push(email.clone());
      Ok(())
    }
  }

  #[derive(Default)]
  struct Failing {
    attempts: AtomicUsize,
  }

  impl AlertNotifier for Failing {
    type Error = Unavailable;

    async fn send(&self, _: &AlertEmail) -> Result<(), Unavailable> {
      self.attempts.fetch_add(1, Ordering::SeqCst);
      Err(Unavailable)
    }
  }

  fn identity() -> Identity {
    Identity {
      uid:          "u-1".into(),
      email:        Some("nisha@example.com".into()),
      display_name: None,
    }
  }

  #[tokio::test]
  async fn successful_delivery_creates_one_alert() {
    let records = RecordStore::new(MemoryStore::new());
    let notifier = Recording::default();

    let outcome = activate(&records, &notifier, Some(&identity()), None)
      .await
      .unwrap();

    assert_eq!(outcome.delivery, Delivery::Sent);
    assert_eq!(records.alerts().list().await.unwrap(), vec![outcome.alert.clone()]);
    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from_email, "nisha@example.com");
    assert_eq!(outcome.alert.user.name, "nisha");
  }

  #[tokio::test]
  async fn failed_delivery_still_creates_exactly_one_alert() {
    let records = RecordStore::new(MemoryStore::new());
    let notifier = Failing::default();

    let outcome = activate(&records, &notifier, Some(&identity()), None)
      .await
      .unwrap();

    assert_eq!(
      outcome.delivery,
      Delivery::Failed { reason: "service unavailable".into() }
    );
    assert_eq!(notifier.attempts.load(Ordering::SeqCst), 1);
    let alerts = records.alerts().list().await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].content.starts_with("SOS Alert triggered at Mangalore Institute"));
  }

  #[tokio::test]
  async fn supplied_location_is_recorded() {
    let records = RecordStore::new(MemoryStore::new());
    let location = AlertLocation {
      name:      "Kadri Park".into(),
      latitude:  12.885,
      longitude: 74.855,
    };
    let outcome = activate(&records, &Recording::default(), None, Some(location.clone()))
      .await
      .unwrap();
    assert_eq!(outcome.alert.location, location);
    assert_eq!(outcome.alert.user.name, "Anonymous");
  }
}
