use serde_json::{Map, Value};
use storage::dto::game::NewGame;
use storage::models::Platform;

use crate::resolver::{
    APP_VERSION_KEYS, BUNDLE_ID_KEYS, PUBLISHER_ID_KEYS, STORE_ID_KEYS, resolve_string,
};

/// A feed record reshaped into game fields. `store_id` may still be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedGame {
    pub publisher_id: Option<String>,
    pub name: String,
    pub platform: Platform,
    pub store_id: Option<String>,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: bool,
}

impl MappedGame {
    /// Records without a store id cannot be persisted and yield `None`.
    pub fn into_new_game(self) -> Option<NewGame> {
        let store_id = self.store_id.filter(|id| !id.is_empty())?;

        Some(NewGame {
            publisher_id: self.publisher_id,
            name: self.name,
            platform: self.platform,
            store_id,
            bundle_id: self.bundle_id,
            app_version: self.app_version,
            is_published: self.is_published,
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Maps one raw feed record. Never fails: anything that is not an object maps
/// to a record with every field defaulted.
pub fn map_game_payload(raw: &Value, platform: Platform) -> MappedGame {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);

    let name = match record.get("name") {
        Some(Value::String(s)) => s.clone(),
        Some(other) if is_truthy(other) => other.to_string(),
        _ => String::new(),
    };

    let is_published = match record.get("isPublished") {
        None => true,
        Some(Value::Bool(b)) => *b,
        Some(other) => is_truthy(other),
    };

    MappedGame {
        publisher_id: resolve_string(record, PUBLISHER_ID_KEYS),
        name,
        platform,
        store_id: resolve_string(record, STORE_ID_KEYS),
        bundle_id: resolve_string(record, BUNDLE_ID_KEYS),
        app_version: resolve_string(record, APP_VERSION_KEYS),
        is_published,
    }
}
