//! SOS alert repository. Alerts are append-only.

use chrono::Utc;

use super::{Record, RecordStore};
use crate::{
  Result,
  alert::{NewSosAlert, SosAlert},
  store::{Key, KeyValueStore},
};

impl Record for SosAlert {
  fn id(&self) -> i64 { self.id }
}

pub struct Alerts<'a, S> {
  pub(super) records: &'a RecordStore<S>,
}

impl<S: KeyValueStore> Alerts<'_, S> {
  /// All alerts, oldest first.
  pub async fn list(&self) -> Result<Vec<SosAlert>> {
    self.records.load(Key::SosAlerts).await
  }

  pub async fn append(&self, input: NewSosAlert) -> Result<SosAlert> {
    let content = input.summary();
    let _guard = self.records.lock().await;
    self
      .records
      .append_locked(Key::SosAlerts, |id| SosAlert {
        id,
        content,
        user: input.user,
        location: input.location,
        created_at: Utc::now(),
      })
      .await
  }
}
