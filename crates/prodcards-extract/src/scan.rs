//! Depth-first search over arbitrary JSON for fields whose location is
//! unknown entirely.
//!
//! Complements [`crate::paths`]: where path resolution encodes known
//! candidate locations, the scanner finds a value anywhere in the document
//! by predicate, including by the *name* of the key that leads to it.

use std::collections::HashSet;

use serde_json::Value;

/// Finds the first node in `root` (pre-order) satisfying `predicate`,
/// returning the node together with the key path used to reach it.
///
/// Every node is visited, scalars included. Objects are walked in document
/// insertion order, arrays in index order; array indices appear in the path
/// as decimal strings. An identity-based visited set guarantees termination
/// even if the same node were reachable twice.
pub fn deep_find<'a, P>(root: &'a Value, mut predicate: P) -> Option<(&'a Value, Vec<String>)>
where
    P: FnMut(&Value, &[String]) -> bool,
{
    let mut visited: HashSet<*const Value> = HashSet::new();
    let mut stack: Vec<(&'a Value, Vec<String>)> = vec![(root, Vec::new())];

    while let Some((node, path)) = stack.pop() {
        if !visited.insert(std::ptr::from_ref::<Value>(node)) {
            continue;
        }
        if predicate(node, &path) {
            return Some((node, path));
        }
        // Children pushed in reverse so the first child is popped first.
        match node {
            Value::Object(map) => {
                for (key, child) in map.iter().rev() {
                    let mut child_path = path.clone();
                    child_path.push(key.clone());
                    stack.push((child, child_path));
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate().rev() {
                    let mut child_path = path.clone();
                    child_path.push(index.to_string());
                    stack.push((child, child_path));
                }
            }
            _ => {}
        }
    }
    None
}

/// The final key of an access path, or `""` at the root.
///
/// Field scans often qualify a match by the name of the key holding the
/// value (e.g. a battery duration must live under a battery-ish key).
#[must_use]
pub fn last_key(path: &[String]) -> &str {
    path.last().map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deep_find_locates_scalar_leaf() {
        let doc = json!({"outer": {"inner": {"rating": "IP68"}}});
        let (node, path) = deep_find(&doc, |v, _| v.as_str() == Some("IP68"))
            .expect("expected to find the leaf");
        assert_eq!(node, &json!("IP68"));
        assert_eq!(path, vec!["outer", "inner", "rating"]);
    }

    #[test]
    fn deep_find_predicate_sees_key_path() {
        let doc = json!({"specs": {"batteryLife": "50h", "weight": "40h-ish"}});
        let (node, _) = deep_find(&doc, |v, path| {
            v.is_string() && last_key(path).to_lowercase().contains("battery")
        })
        .expect("expected battery match");
        assert_eq!(node, &json!("50h"));
    }

    #[test]
    fn deep_find_returns_first_match_in_pre_order() {
        let doc = json!({"a": {"x": "first"}, "b": {"x": "second"}});
        let (node, path) = deep_find(&doc, |v, path| {
            v.is_string() && last_key(path) == "x"
        })
        .expect("expected a match");
        assert_eq!(node, &json!("first"));
        assert_eq!(path, vec!["a", "x"]);
    }

    #[test]
    fn deep_find_walks_arrays_with_index_paths() {
        let doc = json!({"items": [{"v": 1}, {"v": 2}]});
        let (_, path) = deep_find(&doc, |v, _| v.as_i64() == Some(2)).expect("expected match");
        assert_eq!(path, vec!["items", "1", "v"]);
    }

    #[test]
    fn deep_find_can_match_container_nodes() {
        let doc = json!({"wrapper": {"list": [{"sku": "A"}]}});
        let (node, _) = deep_find(&doc, |v, _| {
            v.as_array().is_some_and(|items| items.iter().any(Value::is_object))
        })
        .expect("expected the array itself");
        assert!(node.is_array());
    }

    #[test]
    fn deep_find_no_match_returns_none() {
        let doc = json!({"a": [1, 2, 3]});
        assert!(deep_find(&doc, |v, _| v.as_str() == Some("missing")).is_none());
    }

    #[test]
    fn deep_find_root_itself_can_match() {
        let doc = json!({"k": 1});
        let (node, path) = deep_find(&doc, |v, _| v.is_object()).expect("root should match");
        assert_eq!(node, &doc);
        assert!(path.is_empty());
    }

    #[test]
    fn deep_find_terminates_on_deep_and_wide_documents() {
        // Deeply nested
        let mut deep = json!("leaf");
        for _ in 0..500 {
            deep = json!({ "level": deep });
        }
        assert!(deep_find(&deep, |v, _| v.as_str() == Some("leaf")).is_some());

        // Wide with repeated identical subtrees
        let wide = json!({
            "a": {"copy": {"x": 1}},
            "b": {"copy": {"x": 1}},
            "c": {"copy": {"x": 1}}
        });
        assert!(deep_find(&wide, |v, _| v.as_str() == Some("absent")).is_none());
    }

    #[test]
    fn last_key_empty_at_root() {
        assert_eq!(last_key(&[]), "");
        assert_eq!(last_key(&["a".to_owned(), "b".to_owned()]), "b");
    }
}
