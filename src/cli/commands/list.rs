use crate::cli::commands::open_workspace;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::events::refresh_status;
use crate::errors::AppResult;
use crate::models::Collection;
use crate::ui::messages::info;
use crate::utils::colors::{
    GREY, color_for_event_status, color_for_member_status, color_for_optional_field, paint,
};
use crate::utils::date::today;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { what, unresolved } = cmd {
        let (_store, ws) = open_workspace(cfg)?;

        let table = match what {
            Collection::Roster => {
                let mut t = Table::new([
                    "key", "name", "department", "group", "part", "position", "status",
                ]);
                for m in &ws.roster {
                    t.add_row(vec![
                        m.key.clone(),
                        m.name.clone(),
                        m.department.clone(),
                        m.group.clone(),
                        m.part.clone(),
                        m.position.clone(),
                        paint(m.status.as_str(), color_for_member_status(m.status)),
                    ]);
                }
                t
            }
            Collection::Events => {
                let mut t = Table::new([
                    "id", "name", "key", "start", "end", "category", "status", "purpose",
                ]);
                // stored status is as of the import; show it as of today
                let events = refresh_status(&ws.events, today());
                for ev in events.iter().filter(|e| !*unresolved || e.key.is_none()) {
                    let key = ev.key.as_deref().unwrap_or("-");
                    t.add_row(vec![
                        ev.id.clone(),
                        ev.name.clone(),
                        paint(key, color_for_optional_field(ev.key.as_deref())),
                        ev.start.clone(),
                        ev.end.clone(),
                        ev.category.as_str().to_string(),
                        paint(ev.status.as_str(), color_for_event_status(ev.status)),
                        ev.purpose.clone(),
                    ]);
                }
                t
            }
            Collection::Records => {
                let mut t = Table::new([
                    "id",
                    "name",
                    "group",
                    "part",
                    "destination",
                    "start",
                    "end",
                    "purpose",
                ]);
                for r in ws.records.iter().filter(|r| !*unresolved || r.key.is_none()) {
                    let mut row = vec![
                        r.id.clone(),
                        r.name.clone(),
                        r.group.clone(),
                        r.part.clone(),
                        r.destination.clone(),
                        r.start.clone(),
                        r.end.clone(),
                        r.purpose.clone(),
                    ];
                    if cfg.show_raw_columns {
                        row.push(paint(&r.raw.join(" | "), GREY));
                    }
                    t.add_row(row);
                }
                if cfg.show_raw_columns {
                    t.headers.push("raw".to_string());
                }
                t
            }
        };

        if table.is_empty() {
            info(format!("No {} stored.", what.as_str()));
        } else {
            print!("{}", table.render());
        }
    }
    Ok(())
}
