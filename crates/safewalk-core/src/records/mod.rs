//! Typed repositories over a [`KeyValueStore`].
//!
//! Each collection is one JSON value under its own [`Key`]. Callers load the
//! whole collection and filter in memory; there is no query language. Writes
//! are read-modify-write sequences serialised by a single async lock, so at
//! most one writer touches the store at a time.

mod alerts;
mod community;
mod counters;
mod reports;
#[cfg(test)]
mod tests;

pub use alerts::Alerts;
pub use community::Community;
pub use counters::Counters;
pub use reports::Reports;

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{Mutex, MutexGuard};

use crate::{
  Error, Result,
  store::{Key, KeyValueStore},
};

/// A record with a creation-time identifier.
pub trait Record {
  fn id(&self) -> i64;
}

/// Next identifier for a collection: the current time in milliseconds, bumped
/// past the largest existing id so identifiers stay unique and increasing.
pub fn next_id<T: Record>(existing: &[T], now_ms: i64) -> i64 {
  let last = existing.iter().map(Record::id).max();
  match last {
    Some(last) if last >= now_ms => last + 1,
    _ => now_ms,
  }
}

// ─── RecordStore ─────────────────────────────────────────────────────────────

/// The application's record store: one repository per collection on top of a
/// key-value backend.
pub struct RecordStore<S> {
  kv:    S,
  write: Mutex<()>,
}

impl<S: KeyValueStore> RecordStore<S> {
  pub fn new(kv: S) -> Self { Self { kv, write: Mutex::new(()) } }

  pub fn backend(&self) -> &S { &self.kv }

  pub fn reports(&self) -> Reports<'_, S> { Reports { records: self } }

  pub fn alerts(&self) -> Alerts<'_, S> { Alerts { records: self } }

  pub fn community(&self) -> Community<'_, S> { Community { records: self } }

  pub fn counters(&self) -> Counters<'_, S> { Counters { records: self } }

  // ── Primitives shared by the repositories ─────────────────────────────

  /// Take the write lock for a read-modify-write sequence.
  async fn lock(&self) -> MutexGuard<'_, ()> { self.write.lock().await }

  /// Load the value under `key`, or `T::default()` when absent.
  async fn load<T>(&self, key: Key) -> Result<T>
  where
    T: DeserializeOwned + Default,
  {
    let raw = self.kv.get(key).await.map_err(Error::store)?;
    match raw {
      Some(raw) => Ok(serde_json::from_str(&raw)?),
      None => Ok(T::default()),
    }
  }

  async fn save<T>(&self, key: Key, value: &T) -> Result<()>
  where
    T: Serialize + ?Sized,
  {
    let raw = serde_json::to_string(value)?;
    self.kv.set(key, raw).await.map_err(Error::store)
  }

  async fn clear(&self, key: Key) -> Result<()> {
    self.kv.remove(key).await.map_err(Error::store)
  }

  /// Append one record built from its freshly assigned id. The caller must
  /// hold the write lock.
  async fn append_locked<T, F>(&self, key: Key, build: F) -> Result<T>
  where
    T: Record + Serialize + DeserializeOwned + Clone + Send,
    F: FnOnce(i64) -> T + Send,
  {
    let mut items: Vec<T> = self.load(key).await?;
    let id = next_id(&items, Utc::now().timestamp_millis());
    let record = build(id);
    items.push(record.clone());
    self.save(key, &items).await?;
    Ok(record)
  }
}
