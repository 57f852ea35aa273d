//! Free-text schedule block parser.
//!
//! A schedule paste is a flat sequence of three-line blocks:
//!
//! ```text
//! 12-29 ~ 02-12
//! 홍길동
//! 해외출장(생산법인)
//! ```
//!
//! Lines that do not start a block are skipped one at a time.

use crate::core::dates;
use crate::core::identity::{IdentityMatch, NameIndex};
use crate::core::rows::{self, DecodedRow};
use crate::models::trip_event::{EventCategory, EventStatus, TripEvent};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info};

static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:\d{4}-)?\d{1,2}-\d{1,2})\s*~\s*((?:\d{4}-)?\d{1,2}-\d{1,2})")
        .expect("valid date range regex")
});

static TRAILING_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)\s*$").expect("valid suffix regex"));

/// Lines that sit where a name would but describe the slot instead.
const NOT_A_NAME: &[&str] = &["all day", "half day", "종일", "반일", "오전", "오후"];

/// A name that matched several roster members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousName {
    pub name: String,
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EventImport {
    pub events: Vec<TripEvent>,
    /// Names with no roster match, first-seen order, no repeats.
    pub unknown_names: Vec<String>,
    /// Names left without identity because several members carry them.
    pub ambiguous: Vec<AmbiguousName>,
}

fn is_name_line(line: &str) -> bool {
    let starts_with_digit = line.chars().next().is_some_and(|c| c.is_ascii_digit());
    let lowered = line.to_lowercase();
    !starts_with_digit && !NOT_A_NAME.contains(&lowered.as_str())
}

/// Text inside a trailing `(...)` of the purpose, if any.
pub fn purpose_suffix(purpose: &str) -> Option<&str> {
    TRAILING_PAREN
        .captures(purpose)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Purpose with any trailing `(...)` removed.
pub fn strip_purpose_suffix(purpose: &str) -> &str {
    match TRAILING_PAREN.find(purpose) {
        Some(m) => purpose[..m.start()].trim_end(),
        None => purpose.trim_end(),
    }
}

/// A block the scanner accepted, before identity and dedup.
struct Block<'a> {
    start: String,
    end: String,
    name: &'a str,
    purpose: &'a str,
}

/// Try to read a block at `lines[i]`.
fn block_at(lines: &[DecodedRow], i: usize, reference: NaiveDate) -> Option<Block<'_>> {
    let caps = DATE_RANGE.captures(&lines[i].text)?;
    let name = lines.get(i + 1)?.text.as_str();
    let purpose = lines.get(i + 2)?.text.as_str();
    if !is_name_line(name) {
        return None;
    }
    let (start, end) = dates::normalize_range(&caps[1], &caps[2], reference);
    Some(Block {
        start,
        end,
        name,
        purpose,
    })
}

/// Parse schedule blocks.
pub fn parse_events(text: &str, reference: NaiveDate, names: &NameIndex) -> EventImport {
    parse_events_at(text, reference, names, Utc::now())
}

pub fn parse_events_at(
    text: &str,
    reference: NaiveDate,
    names: &NameIndex,
    now: DateTime<Utc>,
) -> EventImport {
    // whole lines; the delimiter never appears in these blocks
    let lines = rows::decode_rows(text, '\n');

    let mut out = EventImport::default();
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut unknown: HashSet<String> = HashSet::new();
    let mut ambiguous: HashSet<String> = HashSet::new();

    let mut i = 0;
    while i < lines.len() {
        let Some(block) = block_at(&lines, i, reference) else {
            i += 1;
            continue;
        };
        i += 3;

        let dedup = (
            block.name.to_string(),
            block.start.clone(),
            block.end.clone(),
        );
        if !seen.insert(dedup) {
            debug!(name = block.name, start = %block.start, "duplicate event block dropped");
            continue;
        }

        let key = match names.resolve(block.name) {
            IdentityMatch::Resolved(key) => Some(key),
            IdentityMatch::Ambiguous(candidates) => {
                if ambiguous.insert(block.name.to_string()) {
                    out.ambiguous.push(AmbiguousName {
                        name: block.name.to_string(),
                        candidates,
                    });
                }
                None
            }
            IdentityMatch::Unresolved => {
                if unknown.insert(block.name.to_string()) {
                    out.unknown_names.push(block.name.to_string());
                }
                None
            }
        };

        let status = EventStatus::derive(&block.start, &block.end, reference);
        out.events.push(TripEvent {
            id: uuid::Uuid::new_v4().to_string(),
            key,
            name: block.name.to_string(),
            location: purpose_suffix(block.purpose).unwrap_or("").to_string(),
            purpose: block.purpose.to_string(),
            category: EventCategory::classify(block.purpose),
            status,
            start: block.start,
            end: block.end,
            created_at: now,
            updated_at: now,
        });
    }

    info!(
        events = out.events.len(),
        unknown = out.unknown_names.len(),
        ambiguous = out.ambiguous.len(),
        "schedule blocks parsed"
    );
    out
}

/// Append incoming events whose (name, start, end) is not stored yet.
///
/// Stored events win so their ids, and any resolution pointing at them, survive.
pub fn merge_events(existing: &[TripEvent], incoming: Vec<TripEvent>) -> (Vec<TripEvent>, usize) {
    let mut seen: HashSet<(String, String, String)> = existing
        .iter()
        .map(|e| (e.name.clone(), e.start.clone(), e.end.clone()))
        .collect();
    let mut merged = existing.to_vec();
    let mut added = 0;

    for ev in incoming {
        if seen.insert((ev.name.clone(), ev.start.clone(), ev.end.clone())) {
            merged.push(ev);
            added += 1;
        }
    }
    (merged, added)
}

/// Re-derive lifecycle status against `today`.
pub fn refresh_status(events: &[TripEvent], today: NaiveDate) -> Vec<TripEvent> {
    events
        .iter()
        .map(|ev| {
            let mut ev = ev.clone();
            ev.status = EventStatus::derive(&ev.start, &ev.end, today);
            ev
        })
        .collect()
}
