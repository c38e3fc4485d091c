//! Dotted-path access into loosely shaped Jira payloads.
//!
//! `lookup(&data, "issue.fields.summary")` walks object keys one segment at a
//! time. Arrays and scalars are never descended into, so any segment that is
//! missing or lands on a non-object ends the walk.

use serde_json::Value;

/// Resolves `path` against `value`. A resolved `null` counts as absent.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

pub fn get_or<'a>(value: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    lookup(value, path).unwrap_or(default)
}

/// Strings come back verbatim; any other value as compact JSON.
pub fn text_or(value: &Value, path: &str, default: &str) -> String {
    match lookup(value, path) {
        Some(found) => display_value(found),
        None => default.to_string(),
    }
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_leaf() {
        let data = json!({"issue": {"fields": {"summary": "Fix bug"}}});
        assert_eq!(lookup(&data, "issue.fields.summary"), Some(&json!("Fix bug")));
    }

    #[test]
    fn test_lookup_missing_leaf_uses_default() {
        let data = json!({"issue": {"fields": {"summary": "Fix bug"}}});
        assert_eq!(text_or(&data, "issue.fields.missing", ""), "");
    }

    #[test]
    fn test_lookup_null_leaf_uses_default() {
        let data = json!({"issue": {"fields": {"description": null}}});
        let fallback = json!("n/a");
        assert_eq!(lookup(&data, "issue.fields.description"), None);
        assert_eq!(get_or(&data, "issue.fields.description", &fallback), &fallback);
    }

    #[test]
    fn test_lookup_stops_at_non_object_segment() {
        let data = json!({
            "issue": {
                "fields": "flattened",
                "labels": ["a", "b"],
                "count": 3,
                "gone": null
            }
        });
        assert_eq!(lookup(&data, "issue.fields.summary"), None);
        assert_eq!(lookup(&data, "issue.labels.0"), None);
        assert_eq!(lookup(&data, "issue.count.value"), None);
        assert_eq!(lookup(&data, "issue.gone.deeper"), None);
        assert_eq!(lookup(&json!("scalar"), "issue"), None);
    }

    #[test]
    fn test_lookup_returns_containers() {
        let data = json!({"issue": {"fields": {"labels": ["backend", "urgent"]}}});
        let empty = json!([]);
        let labels = get_or(&data, "issue.fields.labels", &empty);
        assert_eq!(labels, &json!(["backend", "urgent"]));
    }

    #[test]
    fn test_text_or_non_string_values() {
        let data = json!({"a": {"n": 42, "flag": true, "obj": {"k": "v"}}});
        assert_eq!(text_or(&data, "a.n", ""), "42");
        assert_eq!(text_or(&data, "a.flag", ""), "true");
        assert_eq!(text_or(&data, "a.obj", ""), r#"{"k":"v"}"#);
    }
}
