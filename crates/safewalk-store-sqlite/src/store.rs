//! [`SqliteStore`]: the SQLite implementation of [`KeyValueStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::debug;

use safewalk_core::store::{Key, KeyValueStore};

use crate::{
  Error, Result,
  schema::{SCHEMA, SCHEMA_VERSION},
};

/// Durable storage backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let found: i64 = self
      .conn
      .call(|conn| {
        let found: i64 =
          conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        if found <= SCHEMA_VERSION {
          conn.execute_batch(SCHEMA)?;
        }
        Ok(found)
      })
      .await?;

    if found > SCHEMA_VERSION {
      return Err(Error::SchemaVersion { found, supported: SCHEMA_VERSION });
    }
    debug!(version = SCHEMA_VERSION, "sqlite schema ready");
    Ok(())
  }
}

impl KeyValueStore for SqliteStore {
  type Error = Error;

  async fn get(&self, key: Key) -> Result<Option<String>> {
    let value = self
      .conn
      .call(move |conn| {
        conn
          .query_row(
            "SELECT value FROM entries WHERE key = ?1",
            rusqlite::params![key.as_str()],
            |r| r.get(0),
          )
          .optional()
          .map_err(Into::into)
      })
      .await?;
    Ok(value)
  }

  async fn set(&self, key: Key, value: String) -> Result<()> {
    let updated_at = Utc::now().to_rfc3339();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO entries (key, value, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             updated_at = excluded.updated_at",
          rusqlite::params![key.as_str(), value, updated_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn remove(&self, key: Key) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM entries WHERE key = ?1",
          rusqlite::params![key.as_str()],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
