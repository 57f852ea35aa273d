//! Name-based identity matching against the roster.

use crate::models::member::RosterMember;
use crate::models::resolution::NameResolutions;
use crate::models::trip_event::TripEvent;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Result of looking a display name up in the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityMatch {
    /// Exactly one member, or a saved user choice.
    Resolved(String),
    /// Several members share the name; the caller must ask the user.
    Ambiguous(Vec<String>),
    /// Nobody on the roster has this name.
    Unresolved,
}

impl IdentityMatch {
    pub fn key(&self) -> Option<&str> {
        match self {
            IdentityMatch::Resolved(k) => Some(k),
            _ => None,
        }
    }
}

/// name → member keys multimap, plus the user's saved choices.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    by_name: HashMap<String, Vec<String>>,
    keys: HashSet<String>,
    overrides: NameResolutions,
}

impl NameIndex {
    pub fn build(roster: &[RosterMember], overrides: &NameResolutions) -> Self {
        let mut by_name: HashMap<String, Vec<String>> = HashMap::new();
        let mut keys = HashSet::new();
        for m in roster {
            by_name
                .entry(m.name.trim().to_string())
                .or_default()
                .push(m.key.clone());
            keys.insert(m.key.clone());
        }
        Self {
            by_name,
            keys,
            overrides: overrides.clone(),
        }
    }

    pub fn candidates(&self, name: &str) -> &[String] {
        self.by_name
            .get(name.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Match a name. A saved choice is honored only while its key is on the roster.
    pub fn resolve(&self, name: &str) -> IdentityMatch {
        let name = name.trim();
        if let Some(key) = self.overrides.get(name)
            && self.keys.contains(key)
        {
            return IdentityMatch::Resolved(key.clone());
        }

        match self.candidates(name) {
            [] => IdentityMatch::Unresolved,
            [only] => IdentityMatch::Resolved(only.clone()),
            many => IdentityMatch::Ambiguous(many.to_vec()),
        }
    }
}

/// Record the user's choice for an ambiguous name.
pub fn choose_identity(resolutions: &NameResolutions, name: &str, key: &str) -> NameResolutions {
    let mut next = resolutions.clone();
    next.insert(name.trim().to_string(), key.to_string());
    next
}

/// Set `key` on every event for `name` that has no identity yet.
///
/// Returns the new collection and the number of events changed.
pub fn apply_identity(events: &[TripEvent], name: &str, key: &str) -> (Vec<TripEvent>, usize) {
    apply_identity_at(events, name, key, Utc::now())
}

pub fn apply_identity_at(
    events: &[TripEvent],
    name: &str,
    key: &str,
    now: DateTime<Utc>,
) -> (Vec<TripEvent>, usize) {
    let mut changed = 0;
    let out = events
        .iter()
        .map(|ev| {
            if ev.key.is_none() && ev.name == name.trim() {
                changed += 1;
                let mut ev = ev.clone();
                ev.key = Some(key.to_string());
                ev.updated_at = now;
                ev
            } else {
                ev.clone()
            }
        })
        .collect();
    (out, changed)
}
