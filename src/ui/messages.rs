use crate::utils::colors::{BLUE, GREEN, GREY, RED, RESET, YELLOW};
use std::fmt;

const BOLD: &str = "\x1b[1m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", RED, BOLD, ICON_ERR, RESET, msg);
}

/// Section header for import summaries and listings.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}=== {} ==={}", BLUE, BOLD, msg, RESET);
}

/// `label: value` line of an import summary; zero counts are greyed out.
pub fn counter(label: &str, value: usize) {
    let color = if value == 0 { GREY } else { RESET };
    println!("  {:<10} {}{}{}", label, color, value, RESET);
}
