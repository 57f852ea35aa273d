use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::utils::colors::{BLUE, GREEN, MAGENTA, RESET, YELLOW, paint};
use crate::utils::table::Table;

/// Color of an audit operation.
fn color_for_operation(op: &str) -> &'static str {
    match op {
        "import" => GREEN,
        "resolve" | "identify" => YELLOW,
        "migration_applied" => MAGENTA,
        "init" => BLUE,
        _ => RESET,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let store = SqliteStore::open(&cfg.database)?;
        let entries = load_log(store.conn())?;

        let mut table = Table::new(["#", "date", "operation", "message"]);
        table.max_width = 60;
        for e in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or(e.date);
            let op = if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            };
            table.add_row(vec![
                e.id.to_string(),
                date,
                paint(&op, color_for_operation(&e.operation)),
                e.message,
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
