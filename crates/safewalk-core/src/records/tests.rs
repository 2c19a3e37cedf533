use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;

use super::RecordStore;
use crate::{
  Error,
  alert::UserSnapshot,
  community::{CommunityFilter, NewCommunitySubmission, SubmissionKind},
  counters::UsageCounters,
  flow::FlowError,
  report::{IncidentType, NewIncidentReport, ReportStatus, Urgency},
  session::Identity,
  store::{Key, KeyValueStore, MemoryStore},
};

fn store() -> RecordStore<MemoryStore> { RecordStore::new(MemoryStore::new()) }

fn theft() -> NewIncidentReport {
  NewIncidentReport {
    kind:        IncidentType::Theft,
    description: "Phone snatched near the bus stand".into(),
    location:    "Current Location".into(),
    urgency:     Urgency::new(4).unwrap(),
  }
}

fn identity(uid: &str) -> Identity {
  Identity {
    uid:          uid.into(),
    email:        Some(format!("{uid}@example.com")),
    display_name: None,
  }
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_to_empty_store() {
  let records = store();
  assert!(records.reports().list().await.unwrap().is_empty());

  let report = records.reports().append(theft()).await.unwrap();
  assert_eq!(report.status, ReportStatus::Pending);

  let all = records.reports().list().await.unwrap();
  assert_eq!(all, vec![report]);
}

#[tokio::test]
async fn ids_are_unique_and_increasing() {
  let records = store();
  let a = records.reports().append(theft()).await.unwrap();
  let b = records.reports().append(theft()).await.unwrap();
  let c = records.reports().append(theft()).await.unwrap();
  assert!(a.id < b.id && b.id < c.id);
}

#[tokio::test]
async fn status_update_touches_one_record() {
  let records = store();
  let first = records.reports().append(theft()).await.unwrap();
  let second = records.reports().append(theft()).await.unwrap();

  let updated = records
    .reports()
    .update_status(second.id, ReportStatus::Investigating)
    .await
    .unwrap();
  assert_eq!(updated.status, ReportStatus::Investigating);

  let all = records.reports().list().await.unwrap();
  assert_eq!(all[0], first);
  assert_eq!(all[1].status, ReportStatus::Investigating);
  assert_eq!(all[1].description, second.description);
}

#[tokio::test]
async fn status_update_of_unknown_id() {
  let records = store();
  records.reports().append(theft()).await.unwrap();
  let err = records
    .reports()
    .update_status(42, ReportStatus::Resolved)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ReportNotFound(42)));
}

#[tokio::test]
async fn banner_hides_until_next_submission() {
  let records = store();
  assert!(!records.reports().banner_visible().await.unwrap());

  records.reports().append(theft()).await.unwrap();
  assert!(records.reports().banner_visible().await.unwrap());

  records.reports().dismiss_banner().await.unwrap();
  assert!(!records.reports().banner_visible().await.unwrap());
  assert_eq!(records.reports().list().await.unwrap().len(), 1);

  records.reports().append(theft()).await.unwrap();
  assert!(records.reports().banner_visible().await.unwrap());
}

#[tokio::test]
async fn corrupt_collection_is_a_serialization_error() {
  let kv = MemoryStore::new();
  kv.set(Key::IncidentReports, "not json".into()).await.unwrap();
  let records = RecordStore::new(kv);
  let err = records.reports().list().await.unwrap_err();
  assert!(matches!(err, Error::Serialization(_)));
}

// ─── Community ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn community_filters_by_kind() {
  let records = store();
  let user = UserSnapshot::capture(Some(&identity("asha")));
  for (kind, content) in [
    (SubmissionKind::Story, "Walked home with a friend"),
    (SubmissionKind::Incident, "Streetlight out on Main Road"),
  ] {
    records
      .community()
      .append(user.clone(), NewCommunitySubmission { kind, content: content.into() })
      .await
      .unwrap();
  }

  assert_eq!(records.community().list(CommunityFilter::All).await.unwrap().len(), 2);
  let stories = records.community().list(CommunityFilter::Story).await.unwrap();
  assert_eq!(stories.len(), 1);
  assert_eq!(stories[0].user.name, "asha");
}

#[tokio::test]
async fn blank_community_post_is_rejected() {
  let records = store();
  let err = records
    .community()
    .append(UserSnapshot::capture(None), NewCommunitySubmission {
      kind:    SubmissionKind::Story,
      content: "  \n ".into(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Validation(FlowError::EmptyContent)));
  assert!(records.community().list(CommunityFilter::All).await.unwrap().is_empty());
}

// ─── Counters ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn counters_start_at_zero() {
  assert_eq!(store().counters().get().await.unwrap(), UsageCounters::default());
}

#[tokio::test]
async fn repeat_sessions_on_one_day() {
  let records = store();
  let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
  let counters = records.counters();

  counters.record_session_on(&identity("a"), day).await.unwrap();
  counters.record_session_on(&identity("a"), day).await.unwrap();
  let after = counters.record_session_on(&identity("b"), day).await.unwrap();
  assert_eq!(after, UsageCounters {
    active_users:      3,
    new_registrations: 1,
    verified_accounts: 2,
  });

  let next_day = day.succ_opt().unwrap();
  let after = counters.record_session_on(&identity("a"), next_day).await.unwrap();
  assert_eq!(after.new_registrations, 2);
  assert_eq!(after.verified_accounts, 2);
  assert_eq!(counters.get().await.unwrap(), after);
}

/// Fails writes to one key while `failing` is set.
struct FailingWrites {
  inner:   MemoryStore,
  key:     Key,
  failing: AtomicBool,
}

impl KeyValueStore for FailingWrites {
  type Error = std::io::Error;

  async fn get(&self, key: Key) -> Result<Option<String>, std::io::Error> {
    Ok(self.inner.get(key).await.unwrap_or_default())
  }

  async fn set(&self, key: Key, value: String) -> Result<(), std::io::Error> {
    if key == self.key && self.failing.load(Ordering::SeqCst) {
      return Err(std::io::Error::other("disk full"));
    }
    let _ = self.inner.set(key, value).await;
    Ok(())
  }

  async fn remove(&self, key: Key) -> Result<(), std::io::Error> {
    let _ = self.inner.remove(key).await;
    Ok(())
  }
}

#[tokio::test]
async fn failed_counter_write_leaves_account_uncounted() {
  let records = RecordStore::new(FailingWrites {
    inner:   MemoryStore::new(),
    key:     Key::UsageCounters,
    failing: AtomicBool::new(true),
  });
  let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

  let err = records.counters().record_session_on(&identity("a"), day).await.unwrap_err();
  assert!(matches!(err, Error::Store(_)));
  assert_eq!(records.backend().inner.get(Key::KnownAccounts).await.unwrap(), None);
  assert_eq!(records.backend().inner.get(Key::LastRegistrationDay).await.unwrap(), None);

  records.backend().failing.store(false, Ordering::SeqCst);
  let after = records.counters().record_session_on(&identity("a"), day).await.unwrap();
  assert_eq!(after, UsageCounters {
    active_users:      1,
    new_registrations: 1,
    verified_accounts: 1,
  });
}
