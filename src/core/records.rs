//! Tabular trip/attendance export parser.

use crate::core::dates;
use crate::core::rows::{self, DecodedRow, HeaderField, HeaderLayout};
use crate::models::trip_record::TripRecord;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Id,
    Name,
    Group,
    Part,
    Destination,
    Start,
    End,
    Purpose,
}

impl HeaderField for RecordField {
    fn from_token(token: &str) -> Option<Self> {
        use RecordField as F;
        let field = match token {
            "id" | "knoxid" | "employeeid" | "empid" | "사번" | "아이디" => F::Id,
            "name" | "이름" | "성명" => F::Name,
            "group" | "team" | "그룹" | "팀" => F::Group,
            "part" | "파트" => F::Part,
            "destination" | "dest" | "country" | "city" | "출장지" | "목적지" | "국가"
            | "도시" | "방문지" => F::Destination,
            "start" | "startdate" | "from" | "departure" | "시작일" | "출발일" | "시작" => {
                F::Start
            }
            "end" | "enddate" | "to" | "return" | "종료일" | "복귀일" | "종료" => F::End,
            "purpose" | "reason" | "목적" | "출장목적" => F::Purpose,
            _ => return None,
        };
        Some(field)
    }
}

/// Legacy export layout, eight columns.
const FULL_LAYOUT: [RecordField; 8] = [
    RecordField::Id,
    RecordField::Name,
    RecordField::Group,
    RecordField::Part,
    RecordField::Destination,
    RecordField::Start,
    RecordField::End,
    RecordField::Purpose,
];

/// Best-effort order for short rows.
const SHORT_LAYOUT: [RecordField; 5] = [
    RecordField::Name,
    RecordField::Destination,
    RecordField::Start,
    RecordField::End,
    RecordField::Purpose,
];

fn positional_layout(columns: usize) -> HeaderLayout<RecordField> {
    match columns {
        n if n >= FULL_LAYOUT.len() => HeaderLayout::positional(&FULL_LAYOUT),
        7 => HeaderLayout::positional(&FULL_LAYOUT[1..]),
        n => HeaderLayout::positional(&SHORT_LAYOUT[..n.min(SHORT_LAYOUT.len())]),
    }
}

/// A row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordImport {
    pub records: Vec<TripRecord>,
    pub errors: Vec<RowError>,
    /// Widest row seen, header included.
    pub max_columns: usize,
    pub headers: Option<Vec<String>>,
}

fn record_from_row(
    row: &DecodedRow,
    layout: &HeaderLayout<RecordField>,
    reference: NaiveDate,
    now: DateTime<Utc>,
) -> Result<TripRecord, RowError> {
    use RecordField as F;

    let name = layout.get(row, F::Name);
    if name.is_empty() {
        return Err(RowError {
            line: row.line,
            message: if layout.has(F::Name) {
                "name cell is empty".to_string()
            } else {
                format!("no name column in a {}-column row", row.cells.len())
            },
        });
    }

    let (start, end) = dates::normalize_range(
        layout.get(row, F::Start),
        layout.get(row, F::End),
        reference,
    );
    let id_cell = layout.get(row, F::Id);

    Ok(TripRecord {
        id: uuid::Uuid::new_v4().to_string(),
        key: (!id_cell.is_empty()).then(|| id_cell.to_string()),
        name: name.to_string(),
        group: layout.get(row, F::Group).to_string(),
        part: layout.get(row, F::Part).to_string(),
        destination: layout.get(row, F::Destination).to_string(),
        start,
        end,
        purpose: layout.get(row, F::Purpose).to_string(),
        raw: row.cells.clone(),
        line: row.line,
        created_at: now,
        updated_at: now,
    })
}

/// Parse a pasted export. Bad rows are reported, never fatal.
pub fn parse_records(text: &str, reference: NaiveDate, delimiter: char) -> RecordImport {
    parse_records_at(text, reference, delimiter, Utc::now())
}

pub fn parse_records_at(
    text: &str,
    reference: NaiveDate,
    delimiter: char,
    now: DateTime<Utc>,
) -> RecordImport {
    let decoded = rows::decode_rows(text, delimiter);
    let mut out = RecordImport {
        max_columns: decoded.iter().map(|r| r.cells.len()).max().unwrap_or(0),
        ..Default::default()
    };
    let Some(first) = decoded.first() else {
        return out;
    };

    let header = rows::detect_header::<RecordField>(first);
    let body = match &header {
        Some(layout) => {
            out.headers = Some(layout.labels.clone());
            &decoded[1..]
        }
        None => &decoded[..],
    };

    for row in body {
        let positional;
        let layout = match &header {
            Some(h) => h,
            None => {
                positional = positional_layout(row.cells.len());
                &positional
            }
        };

        match record_from_row(row, layout, reference, now) {
            Ok(record) => out.records.push(record),
            Err(e) => {
                debug!(line = e.line, error = %e.message, "record row rejected");
                out.errors.push(e);
            }
        }
    }

    info!(
        records = out.records.len(),
        errors = out.errors.len(),
        max_columns = out.max_columns,
        "trip records parsed"
    );
    out
}

/// Append incoming records not stored yet (same name, dates and destination).
pub fn merge_records(
    existing: &[TripRecord],
    incoming: Vec<TripRecord>,
) -> (Vec<TripRecord>, usize) {
    let mut seen: HashSet<(String, String, String, String)> = existing
        .iter()
        .map(|r| {
            (
                r.name.clone(),
                r.start.clone(),
                r.end.clone(),
                r.destination.clone(),
            )
        })
        .collect();
    let mut merged = existing.to_vec();
    let mut added = 0;

    for record in incoming {
        let key = (
            record.name.clone(),
            record.start.clone(),
            record.end.clone(),
            record.destination.clone(),
        );
        if seen.insert(key) {
            merged.push(record);
            added += 1;
        }
    }
    (merged, added)
}
