mod common;
use common::{at, day};
use rtripdesk::core::records::{merge_records, parse_records_at};

#[test]
fn test_headerless_full_layout() {
    let text = "E001\t홍길동\tG1\tP1\tSDV\t01-12\t02-03\t생산법인 지원\n";
    let out = parse_records_at(text, day("2025-03-01"), '\t', at(2025, 3, 1));

    assert!(out.headers.is_none());
    assert!(out.errors.is_empty());
    assert_eq!(out.max_columns, 8);

    let r = &out.records[0];
    assert_eq!(r.key.as_deref(), Some("E001"));
    assert_eq!(r.name, "홍길동");
    assert_eq!(r.group, "G1");
    assert_eq!(r.part, "P1");
    assert_eq!(r.destination, "SDV");
    assert_eq!(r.start, "2025-01-12");
    assert_eq!(r.end, "2025-02-03");
    assert_eq!(r.purpose, "생산법인 지원");
    assert_eq!(r.raw.len(), 8);
    assert_eq!(r.line, 1);
}

#[test]
fn test_seven_columns_drop_the_id() {
    let text = "홍길동\tG1\tP1\tSDV\t01-12\t02-03\t지원\n";
    let out = parse_records_at(text, day("2025-03-01"), '\t', at(2025, 3, 1));
    let r = &out.records[0];

    assert_eq!(r.key, None);
    assert_eq!(r.name, "홍길동");
    assert_eq!(r.destination, "SDV");
    assert_eq!(r.purpose, "지원");
}

#[test]
fn test_short_rows_are_best_effort() {
    let text = "홍길동\tSDV\t01-12\n";
    let out = parse_records_at(text, day("2025-03-01"), '\t', at(2025, 3, 1));
    let r = &out.records[0];

    assert_eq!(r.destination, "SDV");
    assert_eq!(r.start, "2025-01-12");
    assert_eq!(r.end, "");
    assert_eq!(r.raw, vec!["홍길동", "SDV", "01-12"]);
}

#[test]
fn test_header_driven_layout() {
    let text = "이름\t출장지\t시작일\t종료일\t목적\t비고
홍길동\t베트남\t2025-01-12\t2025-01-20\t지원\tx
김철수\t독일
";
    let out = parse_records_at(text, day("2025-03-01"), '\t', at(2025, 3, 1));

    assert_eq!(out.headers.as_ref().map(Vec::len), Some(6));
    assert_eq!(out.records.len(), 2);
    assert_eq!(out.records[0].destination, "베트남");
    assert_eq!(out.records[0].end, "2025-01-20");
    assert_eq!(out.records[0].raw.len(), 6);
    assert_eq!(out.records[0].line, 2);

    assert_eq!(out.records[1].destination, "독일");
    assert_eq!(out.records[1].start, "");
    assert_eq!(out.records[1].raw.len(), 2);
}

#[test]
fn test_rows_without_name_become_errors() {
    let text = "E001\t홍길동\tG1\tP1\tSDV\t01-12\t02-03\t지원

E009\t\tG1\tP1\tSDV\t01-12\t02-03\t지원
E010\t김철수\tG1\tP1\tSDV\t01-12\t02-03\t지원\t추가
";
    let out = parse_records_at(text, day("2025-03-01"), '\t', at(2025, 3, 1));

    assert_eq!(out.records.len(), 2);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].line, 3);
    assert_eq!(out.errors[0].to_string(), "line 3: name cell is empty");
    assert_eq!(out.max_columns, 9);
    assert_eq!(out.records[1].raw.len(), 9);
}

#[test]
fn test_range_crossing_new_year() {
    let text = "홍길동\tSDV\t12-28\t01-05\n";
    let out = parse_records_at(text, day("2026-01-10"), '\t', at(2026, 1, 10));
    assert_eq!(out.records[0].start, "2025-12-28");
    assert_eq!(out.records[0].end, "2026-01-05");
}

#[test]
fn test_merge_skips_known_records() {
    let text = "홍길동\tSDV\t2025-01-12\t2025-02-03\n";
    let first = parse_records_at(text, day("2025-03-01"), '\t', at(2025, 3, 1));
    let again = parse_records_at(
        &format!("{text}김철수\tSDV\t2025-01-12\t2025-02-03\n"),
        day("2025-03-01"),
        '\t',
        at(2025, 3, 2),
    );

    let (merged, added) = merge_records(&first.records, again.records);
    assert_eq!(added, 1);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].id, first.records[0].id);
}

#[test]
fn test_bom_prefixed_header_is_detected() {
    let text = "\u{feff}이름\t출장지\t시작일\t종료일\n홍길동\tSDV\t2025-01-12\t2025-02-03\n";
    let out = parse_records_at(text, day("2025-03-01"), '\t', at(2025, 3, 1));

    assert!(out.errors.is_empty());
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].name, "홍길동");
    assert_eq!(out.records[0].destination, "SDV");
    assert_eq!(out.headers.as_ref().map(|h| h[0].as_str()), Some("이름"));
}
