use serde_json::Value;

/// Keys that may wrap the record list when a feed answers with an object.
const WRAPPER_KEYS: &[&str] = &["data", "games"];

/// Extracts the list of raw records from a feed body.
///
/// Accepts a bare array or an object wrapping one under `data` or `games`.
/// Any other shape yields no records. Grouped feeds (arrays of arrays) are
/// flattened one level.
pub fn normalize_feed(payload: Value) -> Vec<Value> {
    let records = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => WRAPPER_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    flatten_grouped(records)
}

/// Flattens one level when the first element is itself an array. Only the
/// first element is inspected; non-array elements are kept where they are.
pub fn flatten_grouped(records: Vec<Value>) -> Vec<Value> {
    if !matches!(records.first(), Some(Value::Array(_))) {
        return records;
    }

    records
        .into_iter()
        .flat_map(|item| match item {
            Value::Array(inner) => inner,
            other => vec![other],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let records = normalize_feed(json!([{"id": 1}, {"id": 2}]));
        assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn test_data_wrapper() {
        let records = normalize_feed(json!({"data": [{"id": 1}]}));
        assert_eq!(records, vec![json!({"id": 1})]);
    }

    #[test]
    fn test_games_wrapper() {
        let records = normalize_feed(json!({"games": [{"id": 1}], "count": 1}));
        assert_eq!(records, vec![json!({"id": 1})]);
    }

    #[test]
    fn test_data_takes_priority_over_games() {
        let records = normalize_feed(json!({"games": [{"id": 2}], "data": [{"id": 1}]}));
        assert_eq!(records, vec![json!({"id": 1})]);
    }

    #[test]
    fn test_non_array_data_falls_through_to_games() {
        let records = normalize_feed(json!({"data": {"id": 1}, "games": [{"id": 2}]}));
        assert_eq!(records, vec![json!({"id": 2})]);
    }

    #[test]
    fn test_unexpected_shapes_yield_nothing() {
        assert!(normalize_feed(json!(null)).is_empty());
        assert!(normalize_feed(json!(17)).is_empty());
        assert!(normalize_feed(json!("games")).is_empty());
        assert!(normalize_feed(json!({"results": [{"id": 1}]})).is_empty());
        assert!(normalize_feed(json!([])).is_empty());
    }

    #[test]
    fn test_grouped_games_are_flattened_once() {
        let records = normalize_feed(json!({"games": [[{"id": 1}, {"id": 2}]]}));
        assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);

        let records = normalize_feed(json!([[{"id": 1}], [[{"id": 2}]]]));
        assert_eq!(records, vec![json!({"id": 1}), json!([{"id": 2}])]);
    }

    #[test]
    fn test_only_first_element_decides_flattening() {
        let mixed = json!([[{"id": 1}], {"id": 2}]);
        assert_eq!(
            normalize_feed(mixed),
            vec![json!({"id": 1}), json!({"id": 2})]
        );

        let late_group = json!([{"id": 1}, [{"id": 2}]]);
        assert_eq!(
            normalize_feed(late_group),
            vec![json!({"id": 1}), json!([{"id": 2}])]
        );
    }
}
