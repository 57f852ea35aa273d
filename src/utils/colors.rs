/// ANSI color helper utilities for terminal output.
use crate::models::member::MemberStatus;
use crate::models::trip_event::EventStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Returns GREY when the field is empty, RESET otherwise.
pub fn color_for_optional_field<T: AsRef<str>>(value: Option<T>) -> &'static str {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() => RESET,
        _ => GREY,
    }
}

pub fn color_for_member_status(status: MemberStatus) -> &'static str {
    match status {
        MemberStatus::Active => RESET,
        MemberStatus::Leave => YELLOW,
        MemberStatus::Resigned => GREY,
        MemberStatus::Expatriate => MAGENTA,
    }
}

pub fn color_for_event_status(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Planned => CYAN,
        EventStatus::Active => GREEN,
        EventStatus::Completed => GREY,
    }
}

/// Wrap `value` in `color` … RESET.
pub fn paint(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}
