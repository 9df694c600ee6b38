//! SQLite-backed preference store.
//!
//! # Invariants
//! - The connection must be migrated (`db::open_db*`) before use.
//! - Writes are upserts; `updated_at` is epoch ms of the last write.

use super::{PreferenceResult, PreferenceStore};
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct SqlitePreferenceStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceStore<'conn> {
    /// Wraps a migrated connection; rejects connections at another schema
    /// version.
    pub fn try_new(conn: &'conn Connection) -> PreferenceResult<Self> {
        let actual = current_user_version(conn)?;
        let expected = latest_version();
        if actual != expected {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: actual,
                latest_supported: expected,
            }
            .into());
        }
        Ok(Self { conn })
    }
}

impl PreferenceStore for SqlitePreferenceStore<'_> {
    fn get_raw(&self, key: &str) -> PreferenceResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> PreferenceResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at;",
            params![key, value, now_epoch_ms()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> PreferenceResult<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1;", params![key])?;
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
