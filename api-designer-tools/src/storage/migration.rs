use serde_json::{Map, Value};
use crate::helpers::parse_timestamp;

fn rename(object: &mut Map<String, Value>, from: &str, to: &str) {
    if object.contains_key(to) {
        object.remove(from);
    } else if let Some(value) = object.remove(from) {
        object.insert(to.to_string(), value);
    }
}

/// Rewrites a project stored in the old shape, which used `projectId` (often a number),
/// `state` and `createdTime`, into the current shape. Items already in the current shape
/// are returned unchanged.
pub(crate) fn upgrade_legacy_project(item: Value) -> Value {
    let mut object = match item {
        Value::Object(object) => object,
        other => return other,
    };

    if let Some(id) = object.remove("projectId") {
        if !object.contains_key("id") {
            let id = match id {
                Value::String(s) => Value::String(s),
                other => Value::String(other.to_string()),
            };
            object.insert("id".to_string(), id);
        }
    }

    rename(&mut object, "state", "status");
    rename(&mut object, "createdTime", "createdAt");

    if !object.contains_key("updatedAt") {
        if let Some(created) = object.get("createdAt").cloned() {
            object.insert("updatedAt".to_string(), created);
        }
    }

    for key in ["createdAt", "updatedAt"] {
        let valid = object
            .get(key)
            .and_then(|v| v.as_str())
            .is_some_and(|v| parse_timestamp(v).is_some());
        if !valid {
            object.insert(key.to_string(), Value::String("1970-01-01T00:00:00Z".to_string()));
        }
    }

    // Counters and role summaries were derived values in the old shape.
    for derived in ["memberTotal", "belongRole", "administrators"] {
        object.remove(derived);
    }

    Value::Object(object)
}
