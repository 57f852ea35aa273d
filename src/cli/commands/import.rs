use crate::cli::commands::{commit, open_workspace};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::events::{self, EventImport};
use crate::core::identity::NameIndex;
use crate::core::records::{self, RecordImport};
use crate::core::roster::{self, RosterImport, RosterMerge};
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::models::Collection;
use crate::ui::messages::{counter, header, info, success, warning};
use crate::utils::date::reference_date;
use std::fs;
use std::io::{self, Read};

fn read_input(file: Option<&str>) -> AppResult<String> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        what,
        file,
        reference_date: reference_arg,
        dry_run,
    } = cmd
    {
        let text = read_input(file.as_deref())?;
        let reference = reference_date(reference_arg.as_deref())?;
        let delimiter = cfg.delimiter_char()?;
        let (mut store, mut ws) = open_workspace(cfg)?;

        let message = match what {
            Collection::Roster => {
                let parsed = roster::parse_roster(&text, delimiter);
                let merge = roster::merge_roster(&ws.roster, parsed.members.clone());
                print_roster_summary(&parsed, &merge);
                let msg = format!(
                    "roster: {} added, {} updated, {} unchanged",
                    merge.added, merge.updated, merge.unchanged
                );
                ws.roster = merge.merged;
                msg
            }
            Collection::Events => {
                let names = NameIndex::build(&ws.roster, &ws.name_resolutions);
                let parsed = events::parse_events(&text, reference, &names);
                let (merged, added) = events::merge_events(&ws.events, parsed.events.clone());
                print_event_summary(&parsed, added, &ws);
                ws.events = merged;
                format!("events: {} parsed, {} added", parsed.events.len(), added)
            }
            Collection::Records => {
                let parsed = records::parse_records(&text, reference, delimiter);
                let (merged, added) = records::merge_records(&ws.records, parsed.records.clone());
                print_record_summary(&parsed, added);
                ws.records = merged;
                format!(
                    "records: {} parsed, {} added, {} errors",
                    parsed.records.len(),
                    added,
                    parsed.errors.len()
                )
            }
        };

        if *dry_run {
            info("Dry run: nothing saved.");
            return Ok(());
        }

        commit(&mut store, &ws, "import", what.as_str(), &message)?;
        success(format!("Saved {}", message));
    }
    Ok(())
}

fn print_roster_summary(parsed: &RosterImport, merge: &RosterMerge) {
    header("Roster import");
    counter("rows", parsed.total_rows);
    counter("parsed", parsed.parsed_rows);
    counter("skipped", parsed.skipped_rows);
    counter("added", merge.added);
    counter("updated", merge.updated);
    counter("unchanged", merge.unchanged);
    if parsed.headers.is_empty() {
        info("No header row detected, columns read by position.");
    }
    if !parsed.custom_headers.is_empty() {
        info(format!(
            "Extra columns kept: {}",
            parsed.custom_headers.join(", ")
        ));
    }
}

fn print_event_summary(parsed: &EventImport, added: usize, ws: &Workspace) {
    header("Schedule import");
    counter("events", parsed.events.len());
    counter("added", added);
    counter("duplicate", parsed.events.len() - added);

    if !parsed.unknown_names.is_empty() {
        warning(format!(
            "Not on the roster: {}",
            parsed.unknown_names.join(", ")
        ));
    }

    for amb in &parsed.ambiguous {
        warning(format!(
            "'{}' matches {} roster members; pick one with `identify --name {} --key <KEY>`:",
            amb.name,
            amb.candidates.len(),
            amb.name
        ));
        for key in &amb.candidates {
            let detail = ws
                .roster
                .iter()
                .find(|m| &m.key == key)
                .map(|m| format!("{} / {} / {}", m.department, m.group, m.part))
                .unwrap_or_default();
            println!("    {key}  {detail}");
        }
    }
}

fn print_record_summary(parsed: &RecordImport, added: usize) {
    header("Trip record import");
    counter("records", parsed.records.len());
    counter("added", added);
    counter("errors", parsed.errors.len());
    counter("columns", parsed.max_columns);
    if parsed.headers.is_none() {
        info("No header row detected, columns read by position.");
    }
    for e in &parsed.errors {
        warning(e);
    }
}
