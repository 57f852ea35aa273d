use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a tabular trip/attendance export.
///
/// `raw` always holds the original cells of the row, even when the
/// structured fields could only be partially extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: String,
    pub key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub part: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub purpose: String,
    pub raw: Vec<String>,
    /// 1-based line number in the pasted text.
    #[serde(default)]
    pub line: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TripRecord {
    pub fn has_destination(&self) -> bool {
        !self.destination.trim().is_empty()
    }
}
