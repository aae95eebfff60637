//! Caller-input parsing: identifier lists, locale codes, cache keys.
//!
//! Identifiers are opaque, case-sensitive product codes. Order is
//! significant and duplicates are preserved: downstream output must match
//! the caller's sequence exactly, so nothing here sorts or de-duplicates.

/// Parses a comma-separated identifier list.
///
/// Entries are whitespace-trimmed; empty entries are discarded. No case
/// normalization is applied.
#[must_use]
pub fn parse_identifiers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Normalizes a locale code: lower-cased, defaulting to `"se"` when absent
/// or blank.
#[must_use]
pub fn normalize_locale(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_lowercase(),
        _ => "se".to_owned(),
    }
}

/// Builds the cache key for an identifier sequence: the identifiers joined
/// with commas, in caller order.
#[must_use]
pub fn cache_key(ids: &[String]) -> String {
    ids.join(",")
}
