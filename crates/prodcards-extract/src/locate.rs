//! Product locators for the two upstream document shapes.
//!
//! Tries known container locations first (cheap and covers current API
//! versions), then falls back to a full traversal so schema drift across
//! locales and versions cannot break lookup. A miss is a normal outcome,
//! not an error: callers substitute an empty record and let the extractors
//! apply identifier-based defaults.

use std::collections::HashSet;

use serde_json::Value;

use crate::paths::{resolve_first, resolve_path};
use crate::scan::deep_find;

/// Known container locations for the detail API's product list.
const DETAIL_FAST_PATHS: [&[&str]; 6] = [
    &["response", "resultData", "products"],
    &["response", "resultData", "productList"],
    &["response", "resultData", "productCardList"],
    &["resultData", "products"],
    &["products"],
    &["data", "products"],
];

/// Nested carrier candidates for the simple API.
const SIMPLE_CARRIER_PATHS: [&[&str]; 3] = [&["response", "resultData"], &["resultData"], &["data"]];

/// Field names under which a product object may carry its identifier.
const DETAIL_ID_FIELDS: [&str; 3] = ["sku", "modelCode", "code"];
const SIMPLE_ID_FIELDS: [&str; 4] = ["sku", "modelCode", "code", "productCode"];

/// Finds the product object for `id` inside a detail-API response.
///
/// Strategy order:
/// 1. Each known container path whose value is an array, scanned for an
///    element with a matching id field.
/// 2. Full explicit-stack traversal scanning every array anywhere in the
///    document (identity-tracked so no object is visited twice).
/// 3. The document keyed directly by `id`.
#[must_use]
pub fn locate_detail<'a>(doc: &'a Value, id: &str) -> Option<&'a Value> {
    for path in DETAIL_FAST_PATHS {
        if let Some(Value::Array(items)) = resolve_path(doc, path) {
            if let Some(hit) = scan_items(items, id, &DETAIL_ID_FIELDS) {
                return Some(hit);
            }
        }
    }

    if let Some(hit) = traverse_for_id(doc, id, &DETAIL_ID_FIELDS) {
        return Some(hit);
    }

    doc.get(id).filter(|v| v.is_object())
}

/// Finds the product object for `id` inside a simple-API response.
///
/// The simple API usually keys its payload directly by identifier, so that
/// shape is tried first; otherwise a short list of carrier candidates is
/// checked, scanning each carrier's first array-of-objects.
#[must_use]
pub fn locate_simple<'a>(doc: &'a Value, id: &str) -> Option<&'a Value> {
    if let Some(direct) = doc.get(id).filter(|v| v.is_object()) {
        return Some(direct);
    }

    let mut carriers: Vec<&Value> = vec![doc];
    if let Some(nested) = resolve_first(doc, &SIMPLE_CARRIER_PATHS) {
        carriers.push(nested);
    }

    for carrier in carriers {
        match carrier {
            Value::Array(items) => {
                if let Some(hit) = scan_items(items, id, &SIMPLE_ID_FIELDS) {
                    return Some(hit);
                }
            }
            Value::Object(_) => {
                if let Some((Value::Array(items), _)) = deep_find(carrier, |node, _| {
                    node.as_array()
                        .is_some_and(|items| items.iter().any(Value::is_object))
                }) {
                    if let Some(hit) = scan_items(items, id, &SIMPLE_ID_FIELDS) {
                        return Some(hit);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Scans an array for an object whose id field matches `id`.
fn scan_items<'a>(items: &'a [Value], id: &str, id_fields: &[&str]) -> Option<&'a Value> {
    items
        .iter()
        .filter(|item| item.is_object())
        .find(|item| matches_id(item, id, id_fields))
}

fn matches_id(item: &Value, id: &str, id_fields: &[&str]) -> bool {
    id_fields
        .iter()
        .any(|field| item.get(*field).and_then(Value::as_str) == Some(id))
}

/// Walks the whole document with an explicit stack, scanning every array
/// encountered. The visited set tracks node identity, not structure, so the
/// walk terminates on any input.
fn traverse_for_id<'a>(doc: &'a Value, id: &str, id_fields: &[&str]) -> Option<&'a Value> {
    let mut visited: HashSet<*const Value> = HashSet::new();
    let mut stack: Vec<&'a Value> = vec![doc];

    while let Some(node) = stack.pop() {
        if !visited.insert(std::ptr::from_ref::<Value>(node)) {
            continue;
        }
        match node {
            Value::Array(items) => {
                if let Some(hit) = scan_items(items, id, id_fields) {
                    return Some(hit);
                }
                stack.extend(items.iter().rev().filter(|v| is_container(v)));
            }
            Value::Object(map) => {
                stack.extend(map.values().rev().filter(|v| is_container(v)));
            }
            _ => {}
        }
    }
    None
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

#[cfg(test)]
#[path = "locate_test.rs"]
mod tests;
