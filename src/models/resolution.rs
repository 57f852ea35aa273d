//! User choices that disambiguate matches, persisted between runs.

use std::collections::BTreeMap;

/// name → identity key chosen by the user for an ambiguous roster name.
pub type NameResolutions = BTreeMap<String, String>;

/// event id → record id chosen by the user for an ambiguous destination.
pub type DestinationResolutions = BTreeMap<String, String>;
