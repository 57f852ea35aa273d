#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rtripdesk::models::{EventCategory, EventStatus, TripEvent, TripRecord};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rtd() -> Command {
    cargo_bin_cmd!("rtripdesk")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtripdesk.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Write `content` to a fresh file in the temp dir and return its path
pub fn temp_input(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtripdesk_input.txt", name));
    fs::write(&path, content).expect("write input file");
    path.to_string_lossy().to_string()
}

/// Temp output path, removed if it exists
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtripdesk_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
}

pub const ROSTER_WITH_HEADER: &str = "사번\t이름\t부서\t그룹\t파트\t직급\t입사년도\t출생년도\t근무지\t비고
E001\t홍길동\t개발팀\tG1\tP1\t책임\t2015\t1985\t수원\t메모1
E002\t김철수\t개발팀(휴직)\tG1\tP2\t선임\t2019\t1990\t기흥\t
\t이영희\t영업팀 주재원\tG2\tP1\t수석\tabc\t1980\t천안\t
E004\t\t품질팀\tG3\tP3\t사원\t2022\t1998\t수원\t
";

pub const SCHEDULE: &str = "12-29 ~ 02-12
홍길동
해외출장(생산법인)

02-01 ~ 02-05
김철수
교육 참가
02-03 ~ 02-03
종일
연차
02-10 ~ 02-11
박영수
출장
12-29 ~ 02-12
홍길동
해외출장(생산법인)
";

pub fn event(id: &str, name: &str, start: &str, end: &str, purpose: &str) -> TripEvent {
    TripEvent {
        id: id.to_string(),
        key: None,
        name: name.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        location: String::new(),
        purpose: purpose.to_string(),
        category: EventCategory::classify(purpose),
        status: EventStatus::Planned,
        created_at: at(2025, 1, 1),
        updated_at: at(2025, 1, 1),
    }
}

pub fn record(id: &str, name: &str, destination: &str, start: &str, end: &str) -> TripRecord {
    TripRecord {
        id: id.to_string(),
        key: None,
        name: name.to_string(),
        group: "G1".to_string(),
        part: "P1".to_string(),
        destination: destination.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        purpose: "지원".to_string(),
        raw: vec![name.to_string(), destination.to_string()],
        line: 1,
        created_at: at(2025, 1, 1),
        updated_at: at(2025, 1, 1),
    }
}
