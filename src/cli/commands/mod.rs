pub mod config;
pub mod export;
pub mod identify;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod resolve;

use crate::config::Config;
use crate::core::workspace::Workspace;
use crate::db::log::audit;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Open the configured database and load every stored collection.
pub(crate) fn open_workspace(cfg: &Config) -> AppResult<(SqliteStore, Workspace)> {
    let store = SqliteStore::open(&cfg.database)?;
    let ws = Workspace::load(&store)?;
    Ok((store, ws))
}

/// Save the workspace and leave an audit line. A failed audit write is not fatal.
pub(crate) fn commit(
    store: &mut SqliteStore,
    ws: &Workspace,
    operation: &str,
    target: &str,
    message: &str,
) -> AppResult<()> {
    ws.save(store)?;
    if let Err(e) = audit(store.conn(), operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
    Ok(())
}
