//! SQL schema for the SafeWalk SQLite store.
//!
//! One row per storage namespace. Values are opaque JSON text owned by
//! `safewalk-core`; this crate never parses them.

/// Version written to `PRAGMA user_version` by [`SCHEMA`].
pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS entries (
    key         TEXT PRIMARY KEY,   -- namespace, e.g. 'incidentReports'
    value       TEXT NOT NULL,      -- JSON document for the whole namespace
    updated_at  TEXT NOT NULL       -- RFC 3339 UTC
);

PRAGMA user_version = 1;
";
