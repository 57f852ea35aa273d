use crate::errors::AppResult;
use crate::models::member::RosterMember;
use crate::models::trip_event::TripEvent;
use crate::models::trip_record::TripRecord;
use csv::Writer;
use std::path::Path;

pub fn write_roster(path: &Path, members: &[RosterMember]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "key",
        "name",
        "department",
        "group",
        "part",
        "process",
        "position",
        "seniority_year",
        "birth_year",
        "location",
        "status",
        "extra",
    ])?;

    for m in members {
        let extra = m
            .extra
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ");
        let seniority = m.seniority_year.to_string();
        let birth = m.birth_year.to_string();
        wtr.write_record([
            m.key.as_str(),
            m.name.as_str(),
            m.department.as_str(),
            m.group.as_str(),
            m.part.as_str(),
            m.process.as_str(),
            m.position.as_str(),
            seniority.as_str(),
            birth.as_str(),
            m.location.as_str(),
            m.status.as_str(),
            extra.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_events(path: &Path, events: &[TripEvent]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "id", "key", "name", "start", "end", "location", "purpose", "category", "status",
    ])?;

    for ev in events {
        wtr.write_record([
            ev.id.as_str(),
            ev.key.as_deref().unwrap_or(""),
            ev.name.as_str(),
            ev.start.as_str(),
            ev.end.as_str(),
            ev.location.as_str(),
            ev.purpose.as_str(),
            ev.category.as_str(),
            ev.status.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Structured columns first, then the original cells as `raw_1..raw_n`.
pub fn write_records(path: &Path, records: &[TripRecord]) -> AppResult<()> {
    let width = records.iter().map(|r| r.raw.len()).max().unwrap_or(0);
    let mut wtr = Writer::from_path(path)?;

    let mut header: Vec<String> = [
        "id",
        "key",
        "name",
        "group",
        "part",
        "destination",
        "start",
        "end",
        "purpose",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    header.extend((1..=width).map(|i| format!("raw_{i}")));
    wtr.write_record(&header)?;

    for r in records {
        let mut row = vec![
            r.id.clone(),
            r.key.clone().unwrap_or_default(),
            r.name.clone(),
            r.group.clone(),
            r.part.clone(),
            r.destination.clone(),
            r.start.clone(),
            r.end.clone(),
            r.purpose.clone(),
        ];
        row.extend(r.raw.iter().cloned());
        row.resize(header.len(), String::new());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
