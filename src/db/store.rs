//! Key/value persistence behind a trait, so the parsing core never
//! depends on where collections are kept.

use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use std::collections::BTreeMap;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write all entries, or none of them.
    fn put(&mut self, entries: &[(&str, String)]) -> AppResult<()>;
}

/// Volatile store for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, entries: &[(&str, String)]) -> AppResult<()> {
        for (k, v) in entries {
            self.values.insert((*k).to_string(), v.clone());
        }
        Ok(())
    }
}

/// SQLite-backed store using the `kv_store` table.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        run_pending_migrations(&pool.conn)
            .map_err(|e| AppError::Migration(format!("{path}: {e}")))?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        run_pending_migrations(&pool.conn).map_err(|e| AppError::Migration(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &rusqlite::Connection {
        &self.pool.conn
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .pool
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, entries: &[(&str, String)]) -> AppResult<()> {
        let now = Local::now().to_rfc3339();
        self.pool.with_tx(|tx| {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE
                 SET value = excluded.value, updated_at = excluded.updated_at",
            )?;
            for (k, v) in entries {
                stmt.execute(params![k, v, now])?;
            }
            Ok(())
        })?;
        Ok(())
    }
}
