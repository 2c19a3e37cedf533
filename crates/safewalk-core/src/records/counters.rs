//! Usage counter repository.

use chrono::{NaiveDate, Utc};
use tracing::debug;

use super::RecordStore;
use crate::{
  Result,
  counters::UsageCounters,
  session::Identity,
  store::{Key, KeyValueStore},
};

pub struct Counters<'a, S> {
  pub(super) records: &'a RecordStore<S>,
}

impl<S: KeyValueStore> Counters<'_, S> {
  pub async fn get(&self) -> Result<UsageCounters> {
    self.records.load(Key::UsageCounters).await
  }

  /// Count one session establishment for `identity` today (UTC).
  pub async fn record_session(&self, identity: &Identity) -> Result<UsageCounters> {
    self.record_session_on(identity, Utc::now().date_naive()).await
  }

  /// Count one session establishment for `identity` on `today`.
  pub async fn record_session_on(
    &self,
    identity: &Identity,
    today: NaiveDate,
  ) -> Result<UsageCounters> {
    let _guard = self.records.lock().await;

    let mut counters: UsageCounters = self.records.load(Key::UsageCounters).await?;
    let mut known: Vec<String> = self.records.load(Key::KnownAccounts).await?;
    let last_day: Option<NaiveDate> =
      self.records.load(Key::LastRegistrationDay).await?;

    let first_seen_account = !known.contains(&identity.uid);
    let first_today = last_day != Some(today);
    counters.record_session(first_seen_account, first_today);

    // Counters go first: the markers below only ever record a session that
    // has already been counted.
    self.records.save(Key::UsageCounters, &counters).await?;
    if first_seen_account {
      known.push(identity.uid.clone());
      self.records.save(Key::KnownAccounts, &known).await?;
    }
    if first_today {
      self.records.save(Key::LastRegistrationDay, &today).await?;
    }

    debug!(uid = %identity.uid, ?counters, "session counted");
    Ok(counters)
  }
}
