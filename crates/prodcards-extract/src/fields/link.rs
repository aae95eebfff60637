use serde_json::Value;

use crate::paths::resolve_first;

/// Origin prepended to root-relative product-page paths.
const SITE_ORIGIN: &str = "https://www.samsung.com";

const LINK_PATHS: [&[&str]; 4] = [&["pdpUrl"], &["canonicalUrl"], &["url"], &["detailUrl"]];

/// Extracts a product-page URL from a product record.
///
/// Absolute URLs are returned as-is; root-relative paths get the site
/// origin prepended. Anything else (fragments, relative paths without a
/// leading slash) is rejected; the aggregator substitutes the no-link
/// sentinel.
#[must_use]
pub fn extract_link(product: &Value) -> Option<String> {
    let url = resolve_first(product, &LINK_PATHS)?.as_str()?;
    if url.starts_with("http://") || url.starts_with("https://") {
        Some(url.to_owned())
    } else if url.starts_with('/') {
        Some(format!("{SITE_ORIGIN}{url}"))
    } else {
        None
    }
}
