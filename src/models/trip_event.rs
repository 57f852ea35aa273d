use crate::core::dates;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    #[default]
    Trip,
    Vacation,
    Education,
    Other,
}

impl EventCategory {
    const VACATION: &[&str] = &["휴가", "연차", "반차", "vacation", "holiday", "leave"];
    const EDUCATION: &[&str] = &["교육", "연수", "훈련", "training", "education", "seminar"];
    const OTHER: &[&str] = &["재택", "기타", "other"];

    /// Classify a purpose text. Rules are ordered; anything unmatched is a trip.
    pub fn classify(purpose: &str) -> Self {
        let text = purpose.to_lowercase();
        let hit = |needles: &[&str]| needles.iter().any(|n| text.contains(n));

        if hit(Self::VACATION) {
            EventCategory::Vacation
        } else if hit(Self::EDUCATION) {
            EventCategory::Education
        } else if hit(Self::OTHER) {
            EventCategory::Other
        } else {
            EventCategory::Trip
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Trip => "trip",
            EventCategory::Vacation => "vacation",
            EventCategory::Education => "education",
            EventCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Planned,
    Active,
    Completed,
}

impl EventStatus {
    /// Status of the inclusive interval `start..=end` as seen on `today`.
    /// Unparseable bounds leave the event planned.
    pub fn derive(start: &str, end: &str, today: NaiveDate) -> Self {
        match (dates::parse_date(start), dates::parse_date(end)) {
            (Some(s), Some(e)) if today > e && today >= s => EventStatus::Completed,
            (Some(s), Some(_)) if today >= s => EventStatus::Active,
            _ => EventStatus::Planned,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Planned => "planned",
            EventStatus::Active => "active",
            EventStatus::Completed => "completed",
        }
    }
}

/// A trip, leave or education block parsed from free-text schedules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripEvent {
    pub id: String,
    /// Identity key, set only when the name matched exactly one member.
    pub key: Option<String>,
    pub name: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub location: String,
    pub purpose: String,
    pub category: EventCategory,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TripEvent {
    pub fn is_multi_day(&self) -> bool {
        self.start != self.end
    }
}
