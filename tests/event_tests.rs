mod common;
use common::{SCHEDULE, at, day};
use chrono::Datelike;
use rtripdesk::core::events::{
    EventImport, merge_events, parse_events_at, purpose_suffix, refresh_status,
};
use rtripdesk::core::identity::NameIndex;
use rtripdesk::models::{EventCategory, EventStatus, NameResolutions, RosterMember};

fn roster() -> Vec<RosterMember> {
    vec![
        RosterMember::new("E001", "홍길동", at(2025, 1, 1)),
        RosterMember::new("E002", "김철수", at(2025, 1, 1)),
        RosterMember::new("E005", "김철수", at(2025, 1, 1)),
    ]
}

fn index(overrides: &NameResolutions) -> NameIndex {
    NameIndex::build(&roster(), overrides)
}

/// Parse `text` as seen on `reference`, with no saved name choices.
fn parse(text: &str, reference: &str) -> EventImport {
    let idx = index(&NameResolutions::new());
    let d = day(reference);
    parse_events_at(text, d, &idx, at(d.year(), d.month(), d.day()))
}

#[test]
fn test_blocks_parsed_with_year_inference() {
    let out = parse(SCHEDULE, "2026-02-11");

    assert_eq!(out.events.len(), 3);
    let hong = &out.events[0];
    assert_eq!(hong.name, "홍길동");
    assert_eq!(hong.start, "2025-12-29");
    assert_eq!(hong.end, "2026-02-12");
    assert_eq!(hong.key.as_deref(), Some("E001"));
    assert_eq!(hong.location, "생산법인");
    assert_eq!(hong.category, EventCategory::Trip);
    assert_eq!(hong.status, EventStatus::Active);
}

#[test]
fn test_same_year_range_and_categories() {
    let out = parse(SCHEDULE, "2026-02-11");
    let kim = &out.events[1];

    assert_eq!(kim.start, "2026-02-01");
    assert_eq!(kim.end, "2026-02-05");
    assert_eq!(kim.category, EventCategory::Education);
    assert_eq!(kim.status, EventStatus::Completed);
}

#[test]
fn test_sentinel_name_rejects_block() {
    let out = parse(SCHEDULE, "2026-02-11");
    assert!(out.events.iter().all(|e| e.name != "종일"));
    assert!(out.events.iter().all(|e| e.purpose != "연차"));

    let text = "03-02 ~ 03-02\nAll Day\n휴가\n03-03 ~ 03-04\n2팀\n출장\n";
    let none = parse(text, "2026-03-01");
    assert!(none.events.is_empty());
}

#[test]
fn test_duplicate_blocks_collapse() {
    let out = parse(SCHEDULE, "2026-02-11");
    let hong = out.events.iter().filter(|e| e.name == "홍길동").count();
    assert_eq!(hong, 1);
}

#[test]
fn test_unknown_and_ambiguous_names_reported() {
    let out = parse(SCHEDULE, "2026-02-11");

    assert_eq!(out.unknown_names, vec!["박영수".to_string()]);
    assert_eq!(out.ambiguous.len(), 1);
    assert_eq!(out.ambiguous[0].name, "김철수");
    assert_eq!(out.ambiguous[0].candidates, vec!["E002".to_string(), "E005".to_string()]);

    let park = out.events.iter().find(|e| e.name == "박영수").unwrap();
    assert_eq!(park.key, None);
    assert_eq!(park.status, EventStatus::Active);
    let kim = out.events.iter().find(|e| e.name == "김철수").unwrap();
    assert_eq!(kim.key, None);
}

#[test]
fn test_saved_name_choice_resolves_ambiguity() {
    let mut overrides = NameResolutions::new();
    overrides.insert("김철수".to_string(), "E005".to_string());

    let out = parse_events_at(
        SCHEDULE,
        day("2026-02-11"),
        &index(&overrides),
        at(2026, 2, 11),
    );
    let kim = out.events.iter().find(|e| e.name == "김철수").unwrap();
    assert_eq!(kim.key.as_deref(), Some("E005"));
    assert!(out.ambiguous.is_empty());
}

#[test]
fn test_saved_choice_for_removed_member_is_ignored() {
    let mut overrides = NameResolutions::new();
    overrides.insert("김철수".to_string(), "E999".to_string());

    let out = parse_events_at(
        SCHEDULE,
        day("2026-02-11"),
        &index(&overrides),
        at(2026, 2, 11),
    );
    assert_eq!(out.ambiguous.len(), 1);
}

#[test]
fn test_truncated_block_is_ignored() {
    let text = "04-01 ~ 04-03\n홍길동\n";
    let out = parse(text, "2026-03-01");
    assert!(out.events.is_empty());
}

#[test]
fn test_full_dates_in_block() {
    let text = "2025-12-30 ~ 2026-01-02\n홍길동\n연차\n";
    let out = parse(text, "2026-06-01");
    assert_eq!(out.events[0].start, "2025-12-30");
    assert_eq!(out.events[0].end, "2026-01-02");
    assert_eq!(out.events[0].category, EventCategory::Vacation);
    assert_eq!(out.events[0].status, EventStatus::Completed);
}

#[test]
fn test_merge_keeps_stored_events() {
    let idx = index(&NameResolutions::new());
    let first = parse_events_at(SCHEDULE, day("2026-02-11"), &idx, at(2026, 2, 11));
    let second = parse_events_at(SCHEDULE, day("2026-02-11"), &idx, at(2026, 2, 12));

    let (merged, added) = merge_events(&first.events, second.events);
    assert_eq!(added, 0);
    assert_eq!(merged, first.events);
}

#[test]
fn test_refresh_status_moves_events_forward() {
    let idx = index(&NameResolutions::new());
    let out = parse_events_at(SCHEDULE, day("2026-01-15"), &idx, at(2026, 1, 15));
    assert_eq!(out.events[2].status, EventStatus::Planned);

    let later = refresh_status(&out.events, day("2026-03-01"));
    assert!(later.iter().all(|e| e.status == EventStatus::Completed));
}

#[test]
fn test_purpose_suffix() {
    assert_eq!(purpose_suffix("해외출장(생산법인)"), Some("생산법인"));
    assert_eq!(purpose_suffix("출장"), None);
}

#[test]
fn test_category_rules_apply_in_order() {
    assert_eq!(EventCategory::classify("교육 휴가"), EventCategory::Vacation);
    assert_eq!(EventCategory::classify("연차 (재택)"), EventCategory::Vacation);
    assert_eq!(EventCategory::classify("재택 교육"), EventCategory::Education);
    assert_eq!(EventCategory::classify("재택"), EventCategory::Other);
    assert_eq!(EventCategory::classify("Other duties"), EventCategory::Other);
    assert_eq!(EventCategory::classify("해외출장(SDV)"), EventCategory::Trip);
    assert_eq!(EventCategory::classify(""), EventCategory::Trip);
}
