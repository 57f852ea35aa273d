//! Match schedule events to trip records to learn where people went.

use crate::core::dates;
use crate::core::events::strip_purpose_suffix;
use crate::models::resolution::DestinationResolutions;
use crate::models::trip_event::TripEvent;
use crate::models::trip_record::TripRecord;
use tracing::debug;

/// What the user sees when choosing between several records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationCandidate {
    pub record_id: String,
    pub destination: String,
    pub start: String,
    pub end: String,
    pub group: String,
    pub part: String,
    pub purpose: String,
}

impl From<&TripRecord> for DestinationCandidate {
    fn from(r: &TripRecord) -> Self {
        Self {
            record_id: r.id.clone(),
            destination: r.destination.clone(),
            start: r.start.clone(),
            end: r.end.clone(),
            group: r.group.clone(),
            part: r.part.clone(),
            purpose: r.purpose.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DestinationMatch {
    Matched(TripRecord),
    /// Two or more records qualify; nothing is picked on the user's behalf.
    Ambiguous(Vec<DestinationCandidate>),
    NoMatch,
}

impl DestinationMatch {
    pub fn matched(&self) -> Option<&TripRecord> {
        match self {
            DestinationMatch::Matched(r) => Some(r),
            _ => None,
        }
    }

    pub fn needs_user_choice(&self) -> bool {
        matches!(self, DestinationMatch::Ambiguous(_))
    }

    pub fn candidates(&self) -> &[DestinationCandidate] {
        match self {
            DestinationMatch::Ambiguous(c) => c,
            _ => &[],
        }
    }
}

/// Does `record` qualify for `event` by name and, when both sides have
/// full dates, by interval overlap?
fn qualifies(event: &TripEvent, record: &TripRecord) -> bool {
    if record.name != event.name || !record.has_destination() {
        return false;
    }
    dates::overlaps(&event.start, &event.end, &record.start, &record.end).unwrap_or(true)
}

/// Find the destination record for `event`.
///
/// A saved choice wins as long as its record still exists and carries a
/// destination. This function never persists anything.
pub fn resolve_destination(
    event: &TripEvent,
    records: &[TripRecord],
    saved: &DestinationResolutions,
) -> DestinationMatch {
    if let Some(record_id) = saved.get(&event.id) {
        match records.iter().find(|r| &r.id == record_id) {
            Some(r) if r.has_destination() => return DestinationMatch::Matched(r.clone()),
            _ => debug!(event = %event.id, record = %record_id, "saved destination is stale"),
        }
    }

    let hits: Vec<&TripRecord> = records.iter().filter(|r| qualifies(event, r)).collect();

    match hits.as_slice() {
        [] => DestinationMatch::NoMatch,
        [only] => DestinationMatch::Matched((*only).clone()),
        many => DestinationMatch::Ambiguous(
            many.iter()
                .map(|r| DestinationCandidate::from(*r))
                .collect(),
        ),
    }
}

/// Record the user's choice of record for an event.
pub fn choose_destination(
    saved: &DestinationResolutions,
    event_id: &str,
    record_id: &str,
) -> DestinationResolutions {
    let mut next = saved.clone();
    next.insert(event_id.to_string(), record_id.to_string());
    next
}

/// Purpose text decorated with where and when.
///
/// `해외출장(생산법인)` with a match to SDV from 2025-01-12 to 2025-02-03
/// becomes `해외출장(SDV : 1/12 ~ 2/3)`.
pub fn format_purpose_label(event: &TripEvent, matched: Option<&TripRecord>) -> String {
    let base = strip_purpose_suffix(&event.purpose);
    match matched {
        Some(r) => format!(
            "{}({} : {} ~ {})",
            base,
            r.destination.trim(),
            dates::short_date(&r.start),
            dates::short_date(&r.end)
        ),
        None if event.is_multi_day() => format!(
            "{}({} ~ {})",
            base,
            dates::short_date(&event.start),
            dates::short_date(&event.end)
        ),
        None => event.purpose.clone(),
    }
}
