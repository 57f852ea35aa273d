use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Bring the schema up to date and report how many collections are
/// already stored, so re-running `init` on a live database is visible.
pub fn init_db(conn: &Connection) -> AppResult<usize> {
    run_pending_migrations(conn)?;
    let stored: i64 = conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;
    debug!(stored, "database ready");
    Ok(stored as usize)
}
