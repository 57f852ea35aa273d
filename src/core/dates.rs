//! Date token normalization shared by the event and record parsers.
//!
//! Pasted schedules carry `MM-DD` tokens without a year. The year is
//! inferred from a reference date; a range whose start month is after its
//! end month is taken to cross the new year. Tokens that cannot be read
//! are returned verbatim, never rejected.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[-/.](\d{1,2})$").expect("valid month-day regex"));

static FULL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$").expect("valid full date regex")
});

/// A date token after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Has a year already.
    Full(NaiveDate),
    /// Month and day only.
    MonthDay(u32, u32),
    /// Anything else; kept as text.
    Unknown,
}

fn classify(token: &str) -> Token {
    let t = token.trim();
    if let Some(c) = FULL_DATE.captures(t) {
        let y = c[1].parse().unwrap_or(0);
        let m = c[2].parse().unwrap_or(0);
        let d = c[3].parse().unwrap_or(0);
        return NaiveDate::from_ymd_opt(y, m, d)
            .map(Token::Full)
            .unwrap_or(Token::Unknown);
    }
    if let Some(c) = MONTH_DAY.captures(t) {
        let m: u32 = c[1].parse().unwrap_or(0);
        let d: u32 = c[2].parse().unwrap_or(0);
        // 02-29 is valid in a leap year; check against one.
        if NaiveDate::from_ymd_opt(2024, m, d).is_some() {
            return Token::MonthDay(m, d);
        }
    }
    Token::Unknown
}

fn format(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Place a month-day in `year`; Feb 29 in a common year stays unresolved.
fn with_year(year: i32, month: u32, day: u32, original: &str) -> String {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(format)
        .unwrap_or_else(|| original.trim().to_string())
}

fn render_full(date: NaiveDate, original: &str) -> String {
    let t = original.trim();
    // canonical tokens pass through untouched
    if parse_date(t) == Some(date) && t.len() == 10 {
        t.to_string()
    } else {
        format(date)
    }
}

/// Normalize a single date token using the reference year.
pub fn normalize_date(token: &str, reference: NaiveDate) -> String {
    match classify(token) {
        Token::Full(d) => render_full(d, token),
        Token::MonthDay(m, d) => with_year(reference.year(), m, d, token),
        Token::Unknown => token.trim().to_string(),
    }
}

/// Normalize a `start ~ end` pair of tokens.
///
/// Two month-day tokens whose start month is after the end month span a
/// year boundary: the start lands in the year before the reference year.
/// When only one side carries a year, the other side is placed relative
/// to it.
pub fn normalize_range(start: &str, end: &str, reference: NaiveDate) -> (String, String) {
    let year = reference.year();

    match (classify(start), classify(end)) {
        (Token::MonthDay(sm, sd), Token::MonthDay(em, ed)) => {
            let start_year = if sm > em { year - 1 } else { year };
            (
                with_year(start_year, sm, sd, start),
                with_year(year, em, ed, end),
            )
        }
        (Token::Full(s), Token::MonthDay(em, ed)) => {
            let end_year = if em < s.month() { s.year() + 1 } else { s.year() };
            (render_full(s, start), with_year(end_year, em, ed, end))
        }
        (Token::MonthDay(sm, sd), Token::Full(e)) => {
            let start_year = if sm > e.month() { e.year() - 1 } else { e.year() };
            (with_year(start_year, sm, sd, start), render_full(e, end))
        }
        _ => (
            normalize_date(start, reference),
            normalize_date(end, reference),
        ),
    }
}

/// Parse a canonical `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Render a canonical date as unpadded `month/day`; other text is returned as is.
pub fn short_date(s: &str) -> String {
    match parse_date(s) {
        Some(d) => format!("{}/{}", d.month(), d.day()),
        None => s.trim().to_string(),
    }
}

/// Inclusive interval overlap.
///
/// Returns `None` when any bound is missing or unreadable, so callers can
/// fall back to matching without dates.
pub fn overlaps(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> Option<bool> {
    let a_start = parse_date(a_start)?;
    let a_end = parse_date(a_end)?;
    let b_start = parse_date(b_start)?;
    let b_end = parse_date(b_end)?;
    Some(a_start <= b_end && a_end >= b_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_range_crossing_new_year() {
        let (s, e) = normalize_range("12-29", "02-12", day("2026-02-11"));
        assert_eq!(s, "2025-12-29");
        assert_eq!(e, "2026-02-12");
    }

    #[test]
    fn test_range_same_year() {
        let (s, e) = normalize_range("02-01", "02-05", day("2026-07-30"));
        assert_eq!(s, "2026-02-01");
        assert_eq!(e, "2026-02-05");
    }

    #[test]
    fn test_full_tokens_pass_through() {
        let (s, e) = normalize_range("2024-12-30", "2025-01-03", day("2026-02-11"));
        assert_eq!(s, "2024-12-30");
        assert_eq!(e, "2025-01-03");
    }

    #[test]
    fn test_mixed_tokens_follow_the_dated_side() {
        let (s, e) = normalize_range("2024-12-30", "01-03", day("2026-02-11"));
        assert_eq!(s, "2024-12-30");
        assert_eq!(e, "2025-01-03");
    }

    #[test]
    fn test_unknown_tokens_are_kept() {
        assert_eq!(normalize_date(" TBD ", day("2026-01-01")), "TBD");
        assert_eq!(normalize_date("13-40", day("2026-01-01")), "13-40");
    }

    #[test]
    fn test_dotted_full_date_is_canonicalized() {
        assert_eq!(normalize_date("2025.1.5", day("2026-01-01")), "2025-01-05");
    }

    #[test]
    fn test_short_date_unpadded() {
        assert_eq!(short_date("2025-01-12"), "1/12");
        assert_eq!(short_date("2025-11-03"), "11/3");
        assert_eq!(short_date("soon"), "soon");
    }

    #[test]
    fn test_overlap_is_inclusive() {
        assert_eq!(
            overlaps("2025-01-10", "2025-01-12", "2025-01-12", "2025-01-20"),
            Some(true)
        );
        assert_eq!(
            overlaps("2025-01-10", "2025-01-11", "2025-01-12", "2025-01-20"),
            Some(false)
        );
        assert_eq!(overlaps("", "2025-01-11", "2025-01-12", "2025-01-20"), None);
    }
}
