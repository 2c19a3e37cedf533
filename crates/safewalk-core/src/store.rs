//! The `KeyValueStore` trait: durable device-local storage.
//!
//! Storage is a flat map from a fixed set of [`Key`]s to JSON strings, one
//! value per logical namespace. Typed access goes through
//! [`crate::records::RecordStore`]; nothing else reads or writes keys directly.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  sync::{Arc, Mutex, PoisonError},
};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Every namespace the application stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
  IncidentReports,
  SosAlerts,
  CommunitySubmissions,
  UsageCounters,
  /// Identity uids that have established a session on this device.
  KnownAccounts,
  /// Calendar day of the last counted registration.
  LastRegistrationDay,
  /// Set when the user dismisses the "submitted reports" banner.
  ReportBannerHidden,
}

impl Key {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::IncidentReports => "incidentReports",
      Self::SosAlerts => "sosAlerts",
      Self::CommunitySubmissions => "communitySubmissions",
      Self::UsageCounters => "usageCounters",
      Self::KnownAccounts => "knownAccounts",
      Self::LastRegistrationDay => "lastRegistrationDay",
      Self::ReportBannerHidden => "reportBannerHidden",
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a durable key-value backend.
///
/// An absent key is not an error: `get` returns `None` and callers treat it
/// as an empty collection.
pub trait KeyValueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get(
    &self,
    key: Key,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  /// Insert or overwrite the value stored under `key`.
  fn set(
    &self,
    key: Key,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn remove(
    &self,
    key: Key,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A non-durable store for tests and throwaway runs.
///
/// Cloning is cheap and clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: Arc<Mutex<HashMap<Key, String>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, key: Key) -> Result<Option<String>, Infallible> {
    let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(entries.get(&key).cloned())
  }

  async fn set(&self, key: Key, value: String) -> Result<(), Infallible> {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.insert(key, value);
    Ok(())
  }

  async fn remove(&self, key: Key) -> Result<(), Infallible> {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.remove(&key);
    Ok(())
  }
}
