mod common;
use common::{ROSTER_WITH_HEADER, at};
use rtripdesk::core::roster::{merge_roster_at, parse_roster_at};
use rtripdesk::models::{MemberStatus, RosterMember};

fn parsed() -> Vec<RosterMember> {
    parse_roster_at(ROSTER_WITH_HEADER, '\t', at(2026, 1, 5)).members
}

#[test]
fn test_header_roster_counts_and_fields() {
    let out = parse_roster_at(ROSTER_WITH_HEADER, '\t', at(2026, 1, 5));

    assert_eq!(out.total_rows, 4);
    assert_eq!(out.parsed_rows, 3);
    assert_eq!(out.skipped_rows, 1);
    assert_eq!(out.headers.len(), 10);
    assert_eq!(out.custom_headers, vec!["비고".to_string()]);

    let hong = &out.members[0];
    assert_eq!(hong.key, "E001");
    assert_eq!(hong.name, "홍길동");
    assert_eq!(hong.department, "개발팀");
    assert_eq!(hong.position, "책임");
    assert_eq!(hong.seniority_year, 2015);
    assert_eq!(hong.birth_year, 1985);
    assert_eq!(hong.location, "수원");
    assert_eq!(hong.status, MemberStatus::Active);
    assert_eq!(hong.extra.get("비고").map(String::as_str), Some("메모1"));
}

#[test]
fn test_status_derived_from_department() {
    let members = parsed();
    assert_eq!(members[1].status, MemberStatus::Leave);
    assert_eq!(members[2].status, MemberStatus::Expatriate);
}

#[test]
fn test_status_priority_leave_over_resigned() {
    assert_eq!(MemberStatus::from_department("휴직 후 퇴사"), MemberStatus::Leave);
    assert_eq!(MemberStatus::from_department("퇴사 (파견)"), MemberStatus::Resigned);
    assert_eq!(MemberStatus::from_department("Expat Office"), MemberStatus::Expatriate);
    assert_eq!(MemberStatus::from_department("생산기술"), MemberStatus::Active);
}

#[test]
fn test_missing_key_gets_synthetic_key_and_bad_year_is_zero() {
    let members = parsed();
    let lee = &members[2];
    assert_eq!(lee.key, "anon-4-이영희");
    assert_eq!(lee.seniority_year, 0);
    assert_eq!(lee.birth_year, 1980);
    assert!(lee.extra.is_empty());
}

#[test]
fn test_headerless_rows_use_positional_order() {
    let text = "E010\t박민수\t설비팀\n최지우\n";
    let out = parse_roster_at(text, '\t', at(2026, 1, 5));

    assert!(out.headers.is_empty());
    assert_eq!(out.parsed_rows, 2);
    assert_eq!(out.members[0].key, "E010");
    assert_eq!(out.members[0].department, "설비팀");
    assert_eq!(out.members[1].name, "최지우");
    assert_eq!(out.members[1].key, "anon-2-최지우");
}

#[test]
fn test_wide_headerless_row_keeps_extra_columns() {
    let text = "E011\t정하늘\t품질팀\tG1\tP1\t조립\t사원\t2020\t1995\t수원\t야간\tA동\n";
    let out = parse_roster_at(text, '\t', at(2026, 1, 5));
    let m = &out.members[0];

    assert_eq!(m.process, "조립");
    assert_eq!(m.location, "수원");
    assert_eq!(m.extra.get("column 11").map(String::as_str), Some("야간"));
    assert_eq!(m.extra.get("column 12").map(String::as_str), Some("A동"));
}

#[test]
fn test_custom_delimiter() {
    let text = "사번,이름,부서\nE020,오세훈,경영지원\n";
    let out = parse_roster_at(text, ',', at(2026, 1, 5));
    assert_eq!(out.members.len(), 1);
    assert_eq!(out.members[0].department, "경영지원");
}

#[test]
fn test_empty_input() {
    let out = parse_roster_at("\n  \n", '\t', at(2026, 1, 5));
    assert_eq!(out.total_rows, 0);
    assert!(out.members.is_empty());
}

#[test]
fn test_reimport_identical_roster_is_all_updates() {
    let first = merge_roster_at(&[], parsed(), at(2026, 1, 5));
    assert_eq!(first.added, 3);
    assert_eq!(first.updated, 0);

    let second = merge_roster_at(&first.merged, parsed(), at(2026, 1, 6));
    assert_eq!(second.added, 0);
    assert_eq!(second.updated, 3);
    assert_eq!(second.unchanged, 0);

    // identical apart from the update timestamp
    let strip = |ms: &[RosterMember]| {
        ms.iter()
            .map(|m| RosterMember {
                updated_at: at(2000, 1, 1),
                ..m.clone()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(&first.merged), strip(&second.merged));
}

#[test]
fn test_blank_incoming_field_never_erases() {
    let mut stored = RosterMember::new("E001", "홍길동", at(2025, 6, 1));
    stored.department = "개발팀".to_string();
    stored.birth_year = 1985;
    stored.extra.insert("메모".to_string(), "old".to_string());

    let mut incoming = RosterMember::new("E001", "홍길동", at(2026, 1, 5));
    incoming.group = "G9".to_string();
    incoming.extra.insert("차량".to_string(), "12가3456".to_string());

    let out = merge_roster_at(&[stored.clone()], vec![incoming], at(2026, 1, 5));
    let m = &out.merged[0];

    assert_eq!(m.id, stored.id);
    assert_eq!(m.created_at, stored.created_at);
    assert_eq!(m.department, "개발팀");
    assert_eq!(m.birth_year, 1985);
    assert_eq!(m.group, "G9");
    assert_eq!(m.extra.len(), 2);
}

#[test]
fn test_status_is_replaced_by_latest_import() {
    let mut stored = RosterMember::new("E002", "김철수", at(2025, 6, 1));
    stored.status = MemberStatus::Leave;
    let incoming = RosterMember::new("E002", "김철수", at(2026, 1, 5));

    let out = merge_roster_at(&[stored], vec![incoming], at(2026, 1, 5));
    assert_eq!(out.merged[0].status, MemberStatus::Active);
}

#[test]
fn test_members_missing_from_batch_are_kept() {
    let stored = vec![
        RosterMember::new("E001", "홍길동", at(2025, 6, 1)),
        RosterMember::new("E009", "퇴사자", at(2025, 6, 1)),
    ];
    let incoming = vec![RosterMember::new("E001", "홍길동", at(2026, 1, 5))];

    let out = merge_roster_at(&stored, incoming, at(2026, 1, 5));
    assert_eq!(out.updated, 1);
    assert_eq!(out.unchanged, 1);
    assert_eq!(out.merged.len(), 2);
    assert!(out.merged.iter().any(|m| m.key == "E009"));
}

#[test]
fn test_duplicate_keys_in_one_batch_fold_together() {
    let mut a = RosterMember::new("E030", "한가람", at(2026, 1, 5));
    a.department = "연구소".to_string();
    let mut b = RosterMember::new("E030", "한가람", at(2026, 1, 5));
    b.part = "P7".to_string();

    let out = merge_roster_at(&[], vec![a, b], at(2026, 1, 5));
    assert_eq!(out.merged.len(), 1);
    assert_eq!(out.added, 1);
    assert_eq!(out.updated, 1);
    assert_eq!(out.merged[0].department, "연구소");
    assert_eq!(out.merged[0].part, "P7");
}

#[test]
fn test_bom_prefixed_header_is_detected() {
    let text = "\u{feff}사번\t이름\t부서\nE001\t홍길동\t개발팀\n";
    let out = parse_roster_at(text, '\t', at(2026, 1, 5));

    assert!(out.custom_headers.is_empty());
    assert_eq!(out.members.len(), 1);
    assert_eq!(out.members[0].key, "E001");
    assert_eq!(out.members[0].department, "개발팀");
    assert!(out.members[0].extra.is_empty());
}
