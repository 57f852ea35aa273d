use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Employment status derived from the department column on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Leave,
    Resigned,
    Expatriate,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Leave => "leave",
            MemberStatus::Resigned => "resigned",
            MemberStatus::Expatriate => "expatriate",
        }
    }

    /// Derive the status from free-text department content.
    ///
    /// Substring groups are checked in a fixed order: leave, resignation,
    /// expatriate. The first group that matches wins.
    pub fn from_department(department: &str) -> Self {
        const LEAVE: &[&str] = &["휴직", "leave"];
        const RESIGNED: &[&str] = &["퇴직", "퇴사", "resign"];
        const EXPATRIATE: &[&str] = &["주재", "파견", "expat"];

        let text = department.to_lowercase();
        let hit = |needles: &[&str]| needles.iter().any(|n| text.contains(n));

        if hit(LEAVE) {
            MemberStatus::Leave
        } else if hit(RESIGNED) {
            MemberStatus::Resigned
        } else if hit(EXPATRIATE) {
            MemberStatus::Expatriate
        } else {
            MemberStatus::Active
        }
    }
}

/// One person on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterMember {
    /// Internal id, stable across merges.
    pub id: String,
    /// Externally issued identity key, unique across the roster.
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub part: String,
    #[serde(default)]
    pub process: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub seniority_year: i32,
    #[serde(default)]
    pub birth_year: i32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: MemberStatus,
    /// Values from columns the importer does not know, keyed by header text.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RosterMember {
    /// Blank member with a fresh internal id, stamped at `now`.
    pub fn new(key: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            key: key.into(),
            name: name.into(),
            department: String::new(),
            group: String::new(),
            part: String::new(),
            process: String::new(),
            position: String::new(),
            seniority_year: 0,
            birth_year: 0,
            location: String::new(),
            status: MemberStatus::Active,
            extra: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
