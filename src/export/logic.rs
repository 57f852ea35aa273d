// src/export/logic.rs

use crate::core::workspace::Workspace;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::{ExportFormat, csv, json, notify_export_success};
use crate::models::Collection;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export one collection of the workspace to `file`.
    pub fn export(
        ws: &Workspace,
        what: Collection,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if path.is_dir() {
            return Err(AppError::Export(format!("{file} is a directory")));
        }

        ensure_writable(path, force)?;

        let rows = match what {
            Collection::Roster => ws.roster.len(),
            Collection::Events => ws.events.len(),
            Collection::Records => ws.records.len(),
        };
        if rows == 0 {
            warning(format!("No {} stored, nothing exported.", what.as_str()));
            return Ok(());
        }

        match (what, format) {
            (Collection::Roster, ExportFormat::Csv) => csv::write_roster(path, &ws.roster)?,
            (Collection::Events, ExportFormat::Csv) => csv::write_events(path, &ws.events)?,
            (Collection::Records, ExportFormat::Csv) => csv::write_records(path, &ws.records)?,
            (Collection::Roster, ExportFormat::Json) => json::write_json(path, &ws.roster)?,
            (Collection::Events, ExportFormat::Json) => json::write_json(path, &ws.events)?,
            (Collection::Records, ExportFormat::Json) => json::write_json(path, &ws.records)?,
        }

        notify_export_success(
            &format!("{} {}", what.as_str(), format.as_str()),
            rows,
            path,
        );
        Ok(())
    }
}
