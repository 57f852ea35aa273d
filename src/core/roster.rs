//! Roster import: personnel rows in, merged roster out.

use crate::core::rows::{self, DecodedRow, HeaderField, HeaderLayout};
use crate::models::member::{MemberStatus, RosterMember};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterField {
    Id,
    EmployeeNo,
    Name,
    Department,
    Group,
    Part,
    Process,
    Position,
    Seniority,
    BirthYear,
    Location,
}

impl HeaderField for RosterField {
    fn from_token(token: &str) -> Option<Self> {
        use RosterField as F;
        let field = match token {
            "id" | "identityid" | "employeeid" | "empid" | "userid" | "knoxid" | "아이디" => {
                F::Id
            }
            "empno" | "employeeno" | "employeenumber" | "사번" | "사원번호" => F::EmployeeNo,
            "name" | "fullname" | "이름" | "성명" => F::Name,
            "department" | "dept" | "부서" | "부서명" => F::Department,
            "group" | "team" | "그룹" | "팀" => F::Group,
            "part" | "파트" => F::Part,
            "process" | "processtype" | "공정" => F::Process,
            "position" | "title" | "rank" | "직급" | "직위" => F::Position,
            "seniority" | "seniorityyear" | "joinyear" | "입사년도" => F::Seniority,
            "birthyear" | "birth" | "출생년도" | "생년" => F::BirthYear,
            "location" | "worklocation" | "site" | "근무지" => F::Location,
            _ => return None,
        };
        Some(field)
    }
}

/// Column order assumed for rosters pasted without a header row.
const POSITIONAL: [RosterField; 10] = [
    RosterField::Id,
    RosterField::Name,
    RosterField::Department,
    RosterField::Group,
    RosterField::Part,
    RosterField::Process,
    RosterField::Position,
    RosterField::Seniority,
    RosterField::BirthYear,
    RosterField::Location,
];

fn positional_layout(columns: usize) -> HeaderLayout<RosterField> {
    if columns <= 1 {
        HeaderLayout::positional(&[RosterField::Name])
    } else {
        HeaderLayout::positional(&POSITIONAL[..columns.min(POSITIONAL.len())])
    }
}

/// Outcome of parsing a pasted roster.
#[derive(Debug, Clone, Default)]
pub struct RosterImport {
    pub members: Vec<RosterMember>,
    /// Header row cells, empty when the paste had no header.
    pub headers: Vec<String>,
    /// Header cells that did not match a known field.
    pub custom_headers: Vec<String>,
    pub total_rows: usize,
    pub parsed_rows: usize,
    pub skipped_rows: usize,
}

fn parse_year(s: &str) -> i32 {
    s.trim().parse().unwrap_or(0)
}

fn member_from_row(
    row: &DecodedRow,
    layout: &HeaderLayout<RosterField>,
    now: DateTime<Utc>,
) -> Option<RosterMember> {
    use RosterField as F;

    let name = layout.get(row, F::Name);
    if name.is_empty() {
        return None;
    }

    let key = [layout.get(row, F::Id), layout.get(row, F::EmployeeNo)]
        .into_iter()
        .find(|k| !k.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("anon-{}-{}", row.line, name));

    let mut member = RosterMember::new(key, name, now);
    member.department = layout.get(row, F::Department).to_string();
    member.group = layout.get(row, F::Group).to_string();
    member.part = layout.get(row, F::Part).to_string();
    member.process = layout.get(row, F::Process).to_string();
    member.position = layout.get(row, F::Position).to_string();
    member.seniority_year = parse_year(layout.get(row, F::Seniority));
    member.birth_year = parse_year(layout.get(row, F::BirthYear));
    member.location = layout.get(row, F::Location).to_string();
    member.status = MemberStatus::from_department(&member.department);

    for col in &layout.custom {
        let value = row.cell(col.index);
        if !value.is_empty() {
            member.extra.insert(col.label.clone(), value.to_string());
        }
    }

    // positional rows wider than the known layout
    if layout.labels.is_empty() {
        for (index, value) in row.cells.iter().enumerate().skip(POSITIONAL.len()) {
            if !value.is_empty() {
                member
                    .extra
                    .insert(format!("column {}", index + 1), value.clone());
            }
        }
    }

    Some(member)
}

/// Parse pasted roster text.
pub fn parse_roster(text: &str, delimiter: char) -> RosterImport {
    parse_roster_at(text, delimiter, Utc::now())
}

pub fn parse_roster_at(text: &str, delimiter: char, now: DateTime<Utc>) -> RosterImport {
    let decoded = rows::decode_rows(text, delimiter);
    let Some(first) = decoded.first() else {
        return RosterImport::default();
    };

    let header = rows::detect_header::<RosterField>(first);
    let body = if header.is_some() {
        &decoded[1..]
    } else {
        &decoded[..]
    };

    let mut out = RosterImport {
        total_rows: body.len(),
        ..Default::default()
    };

    if let Some(layout) = &header {
        out.headers = layout.labels.clone();
        out.custom_headers = layout.custom.iter().map(|c| c.label.clone()).collect();
    }

    for row in body {
        let positional;
        let layout = match &header {
            Some(h) => h,
            None => {
                positional = positional_layout(row.cells.len());
                &positional
            }
        };

        match member_from_row(row, layout, now) {
            Some(m) => {
                out.members.push(m);
                out.parsed_rows += 1;
            }
            None => {
                debug!(line = row.line, "roster row has no name, skipped");
                out.skipped_rows += 1;
            }
        }
    }

    info!(
        total = out.total_rows,
        parsed = out.parsed_rows,
        skipped = out.skipped_rows,
        "roster parsed"
    );
    out
}

/// Outcome of merging a parsed roster into the stored one.
#[derive(Debug, Clone, Default)]
pub struct RosterMerge {
    pub merged: Vec<RosterMember>,
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
}

fn pick_text(existing: &str, incoming: &str) -> String {
    if incoming.trim().is_empty() {
        existing.to_string()
    } else {
        incoming.to_string()
    }
}

fn pick_year(existing: i32, incoming: i32) -> i32 {
    if incoming == 0 { existing } else { incoming }
}

/// Field-level reducer: incoming values win unless blank or zero.
///
/// Status is always taken from the incoming row, since it is derived
/// from the department text of the latest import.
fn merge_member(
    existing: &RosterMember,
    incoming: &RosterMember,
    now: DateTime<Utc>,
) -> RosterMember {
    let mut extra: BTreeMap<String, String> = existing.extra.clone();
    for (k, v) in &incoming.extra {
        if !v.trim().is_empty() {
            extra.insert(k.clone(), v.clone());
        }
    }

    RosterMember {
        id: existing.id.clone(),
        key: existing.key.clone(),
        name: pick_text(&existing.name, &incoming.name),
        department: pick_text(&existing.department, &incoming.department),
        group: pick_text(&existing.group, &incoming.group),
        part: pick_text(&existing.part, &incoming.part),
        process: pick_text(&existing.process, &incoming.process),
        position: pick_text(&existing.position, &incoming.position),
        seniority_year: pick_year(existing.seniority_year, incoming.seniority_year),
        birth_year: pick_year(existing.birth_year, incoming.birth_year),
        location: pick_text(&existing.location, &incoming.location),
        status: incoming.status,
        extra,
        created_at: existing.created_at,
        updated_at: now,
    }
}

/// Merge `parsed` into `existing`. Members missing from the batch are kept.
pub fn merge_roster(existing: &[RosterMember], parsed: Vec<RosterMember>) -> RosterMerge {
    merge_roster_at(existing, parsed, Utc::now())
}

pub fn merge_roster_at(
    existing: &[RosterMember],
    parsed: Vec<RosterMember>,
    now: DateTime<Utc>,
) -> RosterMerge {
    let mut lookup: HashMap<&str, &RosterMember> =
        existing.iter().map(|m| (m.key.as_str(), m)).collect();
    // key → position in `merged`, for keys produced by this batch
    let mut emitted: HashMap<String, usize> = HashMap::new();
    let mut out = RosterMerge::default();

    for member in parsed {
        if let Some(&pos) = emitted.get(&member.key) {
            let folded = merge_member(&out.merged[pos], &member, now);
            out.merged[pos] = folded;
            out.updated += 1;
            continue;
        }

        let next = match lookup.remove(member.key.as_str()) {
            Some(current) => {
                out.updated += 1;
                merge_member(current, &member, now)
            }
            None => {
                out.added += 1;
                member
            }
        };
        emitted.insert(next.key.clone(), out.merged.len());
        out.merged.push(next);
    }

    for member in existing {
        if lookup.contains_key(member.key.as_str()) {
            out.merged.push(member.clone());
            out.unchanged += 1;
        }
    }

    info!(
        added = out.added,
        updated = out.updated,
        unchanged = out.unchanged,
        "roster merged"
    );
    out
}
