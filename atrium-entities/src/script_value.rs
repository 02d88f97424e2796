//! Helpers for shaping the JSON trees handed to and from scripts.

use serde_json::{Map, Value};

/// Removes every null entry from a JSON tree, recursively. Objects left empty
/// by the removal are dropped from their parent as well, so an untouched
/// property group disappears entirely.
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, entry) in map {
                if entry.is_null() {
                    continue;
                }
                let stripped = strip_nulls(entry);
                if stripped.as_object().map_or(false, Map::is_empty) {
                    continue;
                }
                out.insert(key, stripped);
            }
            Value::Object(out)
        }
        Value::Array(entries) => Value::Array(entries.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

/// Removes every top-level entry of `value` equal to the corresponding entry
/// of `defaults`, except keys named in `keep`. Entries named in `groups` are
/// property groups and are filtered member by member instead; everything
/// else, including color maps, is compared as a whole.
pub fn strip_defaults(value: Value, defaults: &Value, keep: &[&str], groups: &[&str]) -> Value {
    let (map, default_map) = match (value, defaults.as_object()) {
        (Value::Object(map), Some(default_map)) => (map, default_map),
        (other, _) => return other,
    };

    let mut out = Map::new();
    for (key, entry) in map {
        if keep.contains(&key.as_str()) {
            out.insert(key, entry);
            continue;
        }
        let default_entry = match default_map.get(&key) {
            Some(default_entry) => default_entry,
            None => {
                out.insert(key, entry);
                continue;
            }
        };
        if *default_entry == entry {
            continue;
        }
        if groups.contains(&key.as_str()) {
            let stripped = strip_group(entry, default_entry);
            if !stripped.as_object().map_or(false, Map::is_empty) {
                out.insert(key, stripped);
            }
        } else {
            out.insert(key, entry);
        }
    }
    Value::Object(out)
}

// one level deep: group members are atomic properties
fn strip_group(value: Value, defaults: &Value) -> Value {
    let (map, default_map) = match (value, defaults.as_object()) {
        (Value::Object(map), Some(default_map)) => (map, default_map),
        (other, _) => return other,
    };
    let mut out = Map::new();
    for (key, entry) in map {
        if default_map.get(&key) == Some(&entry) {
            continue;
        }
        out.insert(key, entry);
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_nulls_drops_empty_groups() {
        let stripped = strip_nulls(json!({
            "alpha": 1.0,
            "color": null,
            "keyLight": { "color": null, "intensity": null },
            "haze": { "hazeRange": 500.0, "hazeCeiling": null },
        }));
        assert_eq!(
            stripped,
            json!({ "alpha": 1.0, "haze": { "hazeRange": 500.0 } })
        );
    }

    #[test]
    fn test_strip_defaults_keeps_keep_list() {
        let defaults = json!({ "alpha": 1.0, "name": "", "type": "Box" });
        let stripped = strip_defaults(
            json!({ "alpha": 1.0, "name": "lamp", "type": "Box" }),
            &defaults,
            &["type"],
            &[],
        );
        assert_eq!(stripped, json!({ "name": "lamp", "type": "Box" }));
    }

    #[test]
    fn test_strip_defaults_filters_groups_member_by_member() {
        let defaults = json!({ "skybox": { "url": "", "color": [0, 0, 0] } });
        let stripped = strip_defaults(
            json!({ "skybox": { "url": "", "color": [1, 2, 3] } }),
            &defaults,
            &[],
            &["skybox"],
        );
        assert_eq!(stripped, json!({ "skybox": { "color": [1, 2, 3] } }));

        let all_default = strip_defaults(
            json!({ "skybox": { "url": "", "color": [0, 0, 0] } }),
            &defaults,
            &[],
            &["skybox"],
        );
        assert_eq!(all_default, json!({}));
    }

    #[test]
    fn test_strip_defaults_keeps_non_group_objects_whole() {
        let defaults = json!({ "color": { "red": 255, "green": 255, "blue": 255 } });
        let stripped = strip_defaults(
            json!({ "color": { "red": 255, "green": 255, "blue": 0 } }),
            &defaults,
            &[],
            &[],
        );
        // a changed color keeps all of its channels
        assert_eq!(
            stripped,
            json!({ "color": { "red": 255, "green": 255, "blue": 0 } })
        );
    }
}
