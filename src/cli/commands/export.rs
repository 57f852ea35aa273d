use crate::cli::commands::open_workspace;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        what,
        format,
        file,
        force,
    } = cmd
    {
        let (_store, ws) = open_workspace(cfg)?;
        ExportLogic::export(&ws, *what, *format, file, *force)?;
    }
    Ok(())
}
