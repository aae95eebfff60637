//! Prioritized key-path resolution over loosely-shaped JSON.
//!
//! Upstream card APIs move fields around across locales and versions, so
//! extractors declare their candidate locations as ordered path lists
//! (data, not code branches) and take the first hit. See [`crate::fields`]
//! for the per-field lists.

use serde_json::Value;

/// Resolves a single key-path against `root`.
///
/// Each step addresses an object key; when the current node is an array and
/// the step parses as an index, it addresses that element instead, so a
/// path like `["images", "0", "url"]` stays plain data. Returns `None` as
/// soon as a step cannot be taken (missing key, index out of bounds, or a
/// non-container intermediate node).
pub(crate) fn resolve_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut node = root;
    for step in path {
        node = match node {
            Value::Object(map) => map.get(*step)?,
            Value::Array(items) => items.get(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(node)
}

/// Returns the value at the first path in `paths` that fully resolves to a
/// usable value.
///
/// `null` and the empty string both count as "not found"; resolution
/// continues with the next candidate. Path order encodes extractor-author
/// priority: first match wins, no merging. Never fails; an unresolvable
/// path simply yields nothing.
#[must_use]
pub fn resolve_first<'a>(root: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| resolve_path(root, path))
        .find(|value| has_content(value))
}

/// A value is usable when it is neither `null` nor an empty string.
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn resolve_first_returns_first_matching_path() {
        let doc = json!({"a": {"b": "first"}, "c": "second"});
        let hit = resolve_first(&doc, &[&["a", "b"], &["c"]]);
        assert_eq!(hit.and_then(Value::as_str), Some("first"));
    }

    #[test]
    fn resolve_first_falls_through_to_later_path() {
        let doc = json!({"c": "x"});
        let hit = resolve_first(&doc, &[&["a", "b"], &["c"]]);
        assert_eq!(hit.and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn resolve_first_treats_empty_string_as_not_found() {
        let doc = json!({"a": {"b": ""}});
        assert!(resolve_first(&doc, &[&["a", "b"], &["c"]]).is_none());
    }

    #[test]
    fn resolve_first_treats_null_as_not_found() {
        let doc = json!({"a": null, "b": "fallback"});
        let hit = resolve_first(&doc, &[&["a"], &["b"]]);
        assert_eq!(hit.and_then(Value::as_str), Some("fallback"));
    }

    #[test]
    fn resolve_first_skips_empty_string_in_favor_of_later_path() {
        let doc = json!({"a": {"b": ""}, "c": "usable"});
        let hit = resolve_first(&doc, &[&["a", "b"], &["c"]]);
        assert_eq!(hit.and_then(Value::as_str), Some("usable"));
    }

    #[test]
    fn resolve_path_indexes_arrays_with_numeric_steps() {
        let doc = json!({"images": [{"url": "https://cdn/a.png"}, {"url": "https://cdn/b.png"}]});
        let hit = resolve_first(&doc, &[&["images", "0", "url"]]);
        assert_eq!(hit.and_then(Value::as_str), Some("https://cdn/a.png"));
    }

    #[test]
    fn resolve_path_numeric_step_out_of_bounds_misses() {
        let doc = json!({"images": []});
        assert!(resolve_first(&doc, &[&["images", "0", "url"]]).is_none());
    }

    #[test]
    fn resolve_path_stops_at_scalar_intermediate() {
        let doc = json!({"a": "scalar"});
        assert!(resolve_first(&doc, &[&["a", "b"]]).is_none());
    }

    #[test]
    fn resolve_first_accepts_non_string_values() {
        let doc = json!({"price": {"value": 9990}});
        let hit = resolve_first(&doc, &[&["price", "value"]]);
        assert_eq!(hit.and_then(Value::as_f64), Some(9990.0));
    }

    #[test]
    fn resolve_first_accepts_false_and_zero() {
        // Only null and "" are "not found"; other falsy-looking values count.
        let doc = json!({"flag": false, "n": 0});
        assert_eq!(resolve_first(&doc, &[&["flag"]]), Some(&json!(false)));
        assert_eq!(resolve_first(&doc, &[&["n"]]), Some(&json!(0)));
    }

    #[test]
    fn resolve_first_empty_path_list_misses() {
        let doc = json!({"a": 1});
        assert!(resolve_first(&doc, &[]).is_none());
    }
}
