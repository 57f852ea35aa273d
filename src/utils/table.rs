//! Table rendering utilities for CLI outputs.
//!
//! Widths are measured in terminal columns, so Hangul names line up,
//! and ANSI color codes in cells are ignored when measuring.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ansi regex"));

fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(ANSI.replace_all(s, "").as_ref())
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Cells wider than this are cut with an ellipsis.
    pub max_width: usize,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            max_width: 40,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn clip(&self, s: &str) -> String {
        if visible_width(s) <= self.max_width {
            return s.to_string();
        }
        let plain = ANSI.replace_all(s, "");
        let mut out = String::new();
        let mut used = 0;
        for c in plain.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w + 1 > self.max_width {
                break;
            }
            used += w;
            out.push(c);
        }
        out.push('…');
        out
    }

    pub fn render(&self) -> String {
        let cols = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let cell =
            |row: &Vec<String>, i: usize| self.clip(row.get(i).map(String::as_str).unwrap_or(""));

        let mut widths = vec![0usize; cols];
        for (i, w) in widths.iter_mut().enumerate() {
            *w = std::iter::once(cell(&self.headers, i))
                .chain(self.rows.iter().map(|r| cell(r, i)))
                .map(|c| visible_width(&c))
                .max()
                .unwrap_or(0);
        }

        let line = |row: &Vec<String>| {
            let cells: Vec<String> = (0..cols).map(|i| pad(&cell(row, i), widths[i])).collect();
            cells.join("  ").trim_end().to_string()
        };

        let mut out = String::new();
        out.push_str(&line(&self.headers));
        out.push('\n');
        let total: usize = widths.iter().sum::<usize>() + cols.saturating_sub(1) * 2;
        out.push_str(&"-".repeat(total));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }
}
