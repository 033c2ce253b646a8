//! Ordered key lookups over loosely shaped feed records.
//!
//! Each list is a priority order: the first key holding a usable value wins.

use serde_json::{Map, Value};

pub const STORE_ID_KEYS: &[&str] = &[
    "storeId",
    "store_id",
    "app_id",
    "id",
    "appId",
    "package_name",
    "packageName",
    "bundle_id",
    "bundleId",
];

pub const PUBLISHER_ID_KEYS: &[&str] = &["publisherId", "publisher_id"];

pub const BUNDLE_ID_KEYS: &[&str] = &["bundleId", "bundle_id"];

pub const APP_VERSION_KEYS: &[&str] = &["appVersion", "app_version", "version"];

/// A value counts as present unless it is `null` or the empty string.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Returns the first present value among `keys`, in order.
pub fn pick_first<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_present(value))
}

/// Strings are returned verbatim; anything else is rendered as JSON text.
/// Whole floats drop their fraction so `1.0` and `1` give the same id.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f == 0.0 => "0".to_string(),
            Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

pub fn resolve_string(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    pick_first(record, keys).map(stringify)
}
