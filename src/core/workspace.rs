//! The five persisted collections, loaded and saved by value.

use crate::db::store::KeyValueStore;
use crate::errors::AppResult;
use crate::models::member::RosterMember;
use crate::models::resolution::{DestinationResolutions, NameResolutions};
use crate::models::trip_event::TripEvent;
use crate::models::trip_record::TripRecord;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::debug;

pub const KEY_ROSTER: &str = "roster";
pub const KEY_EVENTS: &str = "events";
pub const KEY_RECORDS: &str = "records";
pub const KEY_NAME_RESOLUTIONS: &str = "name_resolutions";
pub const KEY_DESTINATION_RESOLUTIONS: &str = "destination_resolutions";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workspace {
    pub roster: Vec<RosterMember>,
    pub events: Vec<TripEvent>,
    pub records: Vec<TripRecord>,
    pub name_resolutions: NameResolutions,
    pub destination_resolutions: DestinationResolutions,
}

fn read<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> AppResult<T> {
    match store.get(key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(T::default()),
    }
}

fn write<T: Serialize>(key: &'static str, value: &T) -> AppResult<(&'static str, String)> {
    Ok((key, serde_json::to_string(value)?))
}

impl Workspace {
    pub fn load(store: &dyn KeyValueStore) -> AppResult<Self> {
        Ok(Self {
            roster: read(store, KEY_ROSTER)?,
            events: read(store, KEY_EVENTS)?,
            records: read(store, KEY_RECORDS)?,
            name_resolutions: read(store, KEY_NAME_RESOLUTIONS)?,
            destination_resolutions: read(store, KEY_DESTINATION_RESOLUTIONS)?,
        })
    }

    /// Prune stale resolutions, then write every collection in one batch.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> AppResult<()> {
        let ws = prune_resolutions(self);
        let entries = [
            write(KEY_ROSTER, &ws.roster)?,
            write(KEY_EVENTS, &ws.events)?,
            write(KEY_RECORDS, &ws.records)?,
            write(KEY_NAME_RESOLUTIONS, &ws.name_resolutions)?,
            write(KEY_DESTINATION_RESOLUTIONS, &ws.destination_resolutions)?,
        ];
        store.put(&entries)
    }

    pub fn event(&self, id: &str) -> Option<&TripEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn record(&self, id: &str) -> Option<&TripRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

/// Drop resolutions whose event, record or member no longer exists.
pub fn prune_resolutions(ws: &Workspace) -> Workspace {
    let event_ids: HashSet<&str> = ws.events.iter().map(|e| e.id.as_str()).collect();
    let record_ids: HashSet<&str> = ws.records.iter().map(|r| r.id.as_str()).collect();
    let member_keys: HashSet<&str> = ws.roster.iter().map(|m| m.key.as_str()).collect();

    let destination_resolutions: DestinationResolutions = ws
        .destination_resolutions
        .iter()
        .filter(|(ev, rec)| event_ids.contains(ev.as_str()) && record_ids.contains(rec.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let name_resolutions: NameResolutions = ws
        .name_resolutions
        .iter()
        .filter(|(_, key)| member_keys.contains(key.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let dropped = (ws.destination_resolutions.len() - destination_resolutions.len())
        + (ws.name_resolutions.len() - name_resolutions.len());
    if dropped > 0 {
        debug!(dropped, "stale resolutions pruned");
    }

    Workspace {
        roster: ws.roster.clone(),
        events: ws.events.clone(),
        records: ws.records.clone(),
        name_resolutions,
        destination_resolutions,
    }
}
