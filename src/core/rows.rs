//! Row decoding and header detection for pasted tabular text.

use std::collections::HashMap;
use std::hash::Hash;

/// Default cell separator: spreadsheets and HR portals paste tab-separated text.
pub const DEFAULT_DELIMITER: char = '\t';

/// One non-blank line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRow {
    /// 1-based line number in the original text.
    pub line: usize,
    /// The trimmed line.
    pub text: String,
    /// Trimmed cells, split on the delimiter.
    pub cells: Vec<String>,
}

impl DecodedRow {
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Byte order mark written by spreadsheet "UTF-8" exports.
const BOM: char = '\u{feff}';

/// Split text into rows and cells, dropping blank lines and a leading BOM.
pub fn decode_rows(text: &str, delimiter: char) -> Vec<DecodedRow> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            let cells = raw
                .trim_end_matches('\r')
                .split(delimiter)
                .map(|c| c.trim().to_string())
                .collect();
            Some(DecodedRow {
                line: idx + 1,
                text: trimmed.to_string(),
                cells,
            })
        })
        .collect()
}

/// Lowercase and strip whitespace, underscores and hyphens from a header cell.
pub fn normalize_token(cell: &str) -> String {
    cell.chars()
        .filter(|c| !c.is_whitespace() && !matches!(*c, '_' | '-' | BOM))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A field vocabulary: the set of columns a parser knows by name.
pub trait HeaderField: Copy + Eq + Hash {
    /// Map a normalized header token to a field.
    fn from_token(token: &str) -> Option<Self>;
}

/// A header cell that matched no known field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomColumn {
    pub index: usize,
    pub label: String,
}

/// Column layout for a row set, either read from a header row or assumed.
#[derive(Debug, Clone)]
pub struct HeaderLayout<F: HeaderField> {
    columns: HashMap<F, usize>,
    pub custom: Vec<CustomColumn>,
    /// Original header cells, empty for positional layouts.
    pub labels: Vec<String>,
}

impl<F: HeaderField> HeaderLayout<F> {
    /// Layout that assigns `fields` to columns 0, 1, 2, ...
    pub fn positional(fields: &[F]) -> Self {
        let columns = fields.iter().enumerate().map(|(i, f)| (*f, i)).collect();
        Self {
            columns,
            custom: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn index_of(&self, field: F) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn has(&self, field: F) -> bool {
        self.columns.contains_key(&field)
    }

    /// Cell value for `field`, or an empty string when unmapped or out of range.
    pub fn get<'a>(&self, row: &'a DecodedRow, field: F) -> &'a str {
        self.index_of(field).map(|i| row.cell(i)).unwrap_or("")
    }
}

/// Treat `row` as a header if any cell names a known field.
///
/// The first column carrying a field wins; unknown non-empty cells become
/// custom columns so new export columns are kept without code changes.
pub fn detect_header<F: HeaderField>(row: &DecodedRow) -> Option<HeaderLayout<F>> {
    let mut columns = HashMap::new();
    let mut custom = Vec::new();

    for (index, cell) in row.cells.iter().enumerate() {
        match F::from_token(&normalize_token(cell)) {
            Some(field) => {
                columns.entry(field).or_insert(index);
            }
            None if !cell.is_empty() => custom.push(CustomColumn {
                index,
                label: cell.clone(),
            }),
            None => {}
        }
    }

    if columns.is_empty() {
        return None;
    }

    Some(HeaderLayout {
        columns,
        custom,
        labels: row.cells.clone(),
    })
}
