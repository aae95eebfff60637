use regex::Regex;
use serde_json::Value;

use crate::paths::resolve_first;
use crate::scan::deep_find;

/// CDN origin prepended to root-relative Samsung image paths.
const CDN_ORIGIN: &str = "https://images.samsung.com";

const IMAGE_PATHS: [&[&str]; 11] = [
    &["representativeImageUrl"],
    &["productImageUrl"],
    &["imageUrl"],
    &["image", "url"],
    &["thumbnailUrl"],
    &["thumbUrl"],
    &["media", "thumbnailUrl"],
    &["media", "imageUrl"],
    &["media", "url"],
    &["images", "0", "url"],
    &["assets", "0", "url"],
];

/// Extracts a product image URL from a product record.
///
/// Fallback chain: direct URL aliases, then an `imagePath` + filename pair
/// joined with a single slash, then a whole-record scan for any string that
/// looks like an image URL. Every candidate passes through
/// [`normalize_image_url`].
#[must_use]
pub fn extract_image(product: &Value) -> Option<String> {
    if let Some(direct) = resolve_first(product, &IMAGE_PATHS).and_then(Value::as_str) {
        return Some(normalize_image_url(direct));
    }

    let image_path = resolve_first(product, &[&["imagePath"]]).and_then(Value::as_str);
    let file_name =
        resolve_first(product, &[&["imageName"], &["fileName"]]).and_then(Value::as_str);
    if let (Some(path), Some(name)) = (image_path, file_name) {
        let joined = format!(
            "{}/{}",
            path.trim_end_matches('/'),
            name.trim_start_matches('/')
        );
        return Some(normalize_image_url(&joined));
    }

    let extension_re =
        Regex::new(r"(?i)^https?://.+\.(?:png|jpe?g|webp|gif)$").expect("valid regex");
    let cdn_re = Regex::new(r"(?i)^https?://images\.samsung\.com/").expect("valid regex");
    let (found, _) = deep_find(product, |node, _| {
        node.as_str().is_some_and(|s| {
            extension_re.is_match(s)
                || cdn_re.is_match(s)
                || s.starts_with("//images.samsung.com")
                || s.starts_with("/is/image/samsung/")
        })
    })?;
    found.as_str().map(normalize_image_url)
}

/// Normalizes an image URL candidate.
///
/// Protocol-relative URLs get `https:` prepended; root-relative Samsung CDN
/// paths get the CDN origin prepended; everything else passes through
/// unchanged.
#[must_use]
pub fn normalize_image_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else if url.starts_with("/is/image/samsung/") {
        format!("{CDN_ORIGIN}{url}")
    } else {
        url.to_owned()
    }
}
