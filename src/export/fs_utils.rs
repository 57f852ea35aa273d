// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use std::path::Path;

/// Check that an output file may be created.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → error, nothing is written
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() {
        return Ok(());
    }
    if force {
        info(format!("Overwriting '{}'.", path.display()));
        return Ok(());
    }
    Err(AppError::Export(format!(
        "'{}' already exists (use --force to overwrite)",
        path.display()
    )))
}
