use crate::cli::commands::{commit, open_workspace};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolver::{
    DestinationMatch, choose_destination, format_purpose_label, resolve_destination,
};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{GREEN, GREY, YELLOW, paint};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Resolve { event, choose } = cmd {
        let (mut store, mut ws) = open_workspace(cfg)?;

        //
        // 1. Save a user choice
        //
        if let (Some(event_id), Some(record_id)) = (event, choose) {
            let ev = ws
                .event(event_id)
                .ok_or_else(|| AppError::NotFound(format!("event {event_id}")))?;
            let record = ws
                .record(record_id)
                .ok_or_else(|| AppError::NotFound(format!("record {record_id}")))?;
            if !record.has_destination() {
                return Err(AppError::InvalidInput(format!(
                    "record {record_id} has no destination"
                )));
            }
            let message = format!("{} → {} ({})", ev.name, record.destination, record_id);

            ws.destination_resolutions =
                choose_destination(&ws.destination_resolutions, event_id, record_id);
            commit(&mut store, &ws, "resolve", event_id, &message)?;
            success(format!("Saved destination: {message}"));
            return Ok(());
        }

        //
        // 2. Show matches
        //
        let selected: Vec<_> = match event {
            Some(id) => vec![
                ws.event(id)
                    .ok_or_else(|| AppError::NotFound(format!("event {id}")))?,
            ],
            None => ws.events.iter().collect(),
        };

        if selected.is_empty() {
            info("No events stored.");
            return Ok(());
        }

        header("Destinations");
        let mut pending = 0;
        for ev in selected {
            let outcome = resolve_destination(ev, &ws.records, &ws.destination_resolutions);
            let label = format_purpose_label(ev, outcome.matched());
            match &outcome {
                DestinationMatch::Matched(r) => {
                    println!("{} {}  {}", paint("●", GREEN), ev.name, label);
                    let link = format!("event {} → record {}", ev.id, r.id);
                    println!("    {}", paint(&link, GREY));
                }
                DestinationMatch::Ambiguous(candidates) => {
                    pending += 1;
                    println!("{} {}  {}", paint("?", YELLOW), ev.name, label);
                    println!("    {}", paint(&format!("event {}", ev.id), GREY));
                    for c in candidates {
                        println!(
                            "    - {}  {} ~ {}  {} / {}  {}  [{}]",
                            c.destination, c.start, c.end, c.group, c.part, c.purpose, c.record_id
                        );
                    }
                }
                DestinationMatch::NoMatch => {
                    println!("{} {}  {}", paint("○", GREY), ev.name, label);
                }
            }
        }

        if pending > 0 {
            warning(format!(
                "{pending} event(s) need a choice: \
                 `resolve --event <EVENT_ID> --choose <RECORD_ID>`"
            ));
        }
    }
    Ok(())
}
