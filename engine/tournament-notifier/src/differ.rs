//! Change detection between two snapshots.
//!
//! Membership is decided by identifier only. A tracked tournament whose
//! content changes upstream keeps its identifier and is never announced
//! again; one that drops out of the feed and later returns is announced
//! a second time.

use crate::models::{Snapshot, TOURNAMENT_INFO_KEY};
use serde_json::{Map, Value};

/// Truthiness of a JSON value when read as a dynamic value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Keep the entries that are objects with a truthy `tournament_info`
pub fn filter_tournaments(fetched: Map<String, Value>) -> Snapshot {
    fetched
        .into_iter()
        .filter(|(_, record)| {
            record
                .as_object()
                .and_then(|fields| fields.get(TOURNAMENT_INFO_KEY))
                .map_or(false, is_truthy)
        })
        .collect()
}

/// Entries of `current` whose identifier is absent from `previous`, in `current` order
pub fn new_entries<'a>(current: &'a Snapshot, previous: &Snapshot) -> Vec<(&'a str, &'a Value)> {
    current
        .iter()
        .filter(|(id, _)| !previous.contains_key(id.as_str()))
        .map(|(id, record)| (id.as_str(), record))
        .collect()
}
