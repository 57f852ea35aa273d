use crate::cli::commands::{commit, open_workspace};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::identity::{apply_identity, choose_identity};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Identify { name, key } = cmd {
        let (mut store, mut ws) = open_workspace(cfg)?;
        let name = name.trim();

        let member = ws
            .roster
            .iter()
            .find(|m| &m.key == key)
            .ok_or_else(|| AppError::NotFound(format!("roster member with key {key}")))?;
        if member.name.trim() != name {
            return Err(AppError::InvalidInput(format!(
                "{key} belongs to '{}', not '{name}'",
                member.name
            )));
        }

        ws.name_resolutions = choose_identity(&ws.name_resolutions, name, key);
        let (events, changed) = apply_identity(&ws.events, name, key);
        ws.events = events;

        let message = format!("{name} → {key}, {changed} event(s) updated");
        commit(&mut store, &ws, "identify", name, &message)?;
        success(message);
    }
    Ok(())
}
