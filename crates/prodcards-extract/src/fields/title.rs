use serde_json::Value;

use crate::paths::resolve_first;

const TITLE_PATHS: [&[&str]; 5] = [
    &["displayName"],
    &["name"],
    &["title"],
    &["modelName"],
    &["seoName"],
];

/// Extracts a display title from a product record.
///
/// A candidate is accepted only when its trimmed length exceeds one
/// character; single letters and stray punctuation read as data noise,
/// not names. Returns `None` otherwise; the aggregator falls back to the
/// identifier.
#[must_use]
pub fn extract_title(product: &Value) -> Option<String> {
    let title = resolve_first(product, &TITLE_PATHS)?.as_str()?;
    (title.trim().len() > 1).then(|| title.to_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn title_prefers_display_name() {
        let product = json!({"displayName": "Galaxy Buds2", "name": "buds2-se"});
        assert_eq!(extract_title(&product).as_deref(), Some("Galaxy Buds2"));
    }

    #[test]
    fn title_falls_through_aliases_in_order() {
        let product = json!({"modelName": "SM-R177", "seoName": "ignored"});
        assert_eq!(extract_title(&product).as_deref(), Some("SM-R177"));
    }

    #[test]
    fn title_rejects_single_character() {
        let product = json!({"name": "x"});
        assert_eq!(extract_title(&product), None);
    }

    #[test]
    fn title_rejects_whitespace_padding_around_single_char() {
        let product = json!({"name": "  x  "});
        assert_eq!(extract_title(&product), None);
    }

    #[test]
    fn title_keeps_original_untrimmed_value() {
        let product = json!({"name": " Galaxy "});
        assert_eq!(extract_title(&product).as_deref(), Some(" Galaxy "));
    }

    #[test]
    fn title_absent_on_empty_record() {
        assert_eq!(extract_title(&Value::Null), None);
        assert_eq!(extract_title(&json!({})), None);
    }

    #[test]
    fn title_ignores_non_string_candidates() {
        let product = json!({"displayName": 42});
        assert_eq!(extract_title(&product), None);
    }
}
