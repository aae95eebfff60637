use regex::Regex;
use serde_json::Value;

use crate::paths::resolve_first;
use crate::scan::deep_find;

/// Currency assumed when a record carries a bare numeric amount.
const DEFAULT_CURRENCY: &str = "SEK";

const FORMATTED_PRICE_PATHS: [&[&str]; 7] = [
    &["price", "formattedValue"],
    &["price", "formatted"],
    &["priceDisplay"],
    &["sellingPrice", "formatted"],
    &["finalPrice", "formatted"],
    &["offerPrice", "formatted"],
    &["formattedPrice"],
];

const AMOUNT_PRICE_PATHS: [&[&str]; 5] = [
    &["price", "value"],
    &["sellingPrice", "amount"],
    &["finalPrice", "amount"],
    &["offerPrice", "amount"],
    &["priceValue"],
];

const FORMATTED_COMPARE_PATHS: [&[&str]; 4] = [
    &["listPrice", "formattedValue"],
    &["listPrice", "formatted"],
    &["originalPrice", "formatted"],
    &["wasPrice", "formatted"],
];

const AMOUNT_COMPARE_PATHS: [&[&str]; 3] = [
    &["listPrice", "value"],
    &["originalPrice", "amount"],
    &["wasPrice", "amount"],
];

/// A price candidate pulled from a record, before display formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceSource {
    /// Already rendered for display; passed through verbatim.
    Formatted(String),
    /// A bare amount that still needs locale formatting.
    Amount { value: f64, currency: String },
}

/// Extracts the selling price from a product record.
///
/// Preformatted display strings win over bare amounts; as a last resort
/// the whole record is scanned for a string shaped like a Swedish price.
#[must_use]
pub fn extract_price(product: &Value) -> Option<PriceSource> {
    if let Some(formatted) = resolve_first(product, &FORMATTED_PRICE_PATHS).and_then(Value::as_str)
    {
        return Some(PriceSource::Formatted(formatted.to_owned()));
    }
    if let Some(amount) = resolve_first(product, &AMOUNT_PRICE_PATHS).and_then(Value::as_f64) {
        return Some(PriceSource::Amount {
            value: amount,
            currency: currency_of(product),
        });
    }

    let price_re = Regex::new(r"(?i)(?:\d{1,3}(?:[ .]\d{3})*|\d+)[,.]\d{2}\s?(?:kr|SEK)")
        .expect("valid regex");
    let (found, _) = deep_find(product, |node, _| {
        node.as_str().is_some_and(|s| price_re.is_match(s))
    })?;
    found
        .as_str()
        .map(|s| PriceSource::Formatted(s.to_owned()))
}

/// Extracts the strike-through comparison price, if any.
///
/// No whole-record scan here: a stray price-looking string is far more
/// likely to be the selling price than a list price.
#[must_use]
pub fn extract_compare_price(product: &Value) -> Option<PriceSource> {
    if let Some(formatted) =
        resolve_first(product, &FORMATTED_COMPARE_PATHS).and_then(Value::as_str)
    {
        return Some(PriceSource::Formatted(formatted.to_owned()));
    }
    resolve_first(product, &AMOUNT_COMPARE_PATHS)
        .and_then(Value::as_f64)
        .map(|amount| PriceSource::Amount {
            value: amount,
            currency: currency_of(product),
        })
}

fn currency_of(product: &Value) -> String {
    resolve_first(
        product,
        &[
            &["price", "currencyIso"],
            &["price", "currency"],
            &["currency"],
            &["currencyCode"],
        ],
    )
    .and_then(Value::as_str)
    .map_or_else(|| DEFAULT_CURRENCY.to_owned(), str::to_owned)
}

/// Renders a price candidate for display.
///
/// `None` and non-finite amounts render as the unknown-price sentinel.
/// Amounts get Swedish formatting: space-grouped integer digits, a comma
/// before two decimals, and a `kr` suffix for SEK (other currencies keep
/// their ISO code as the suffix).
#[must_use]
pub fn format_price(source: Option<&PriceSource>) -> String {
    match source {
        None => prodcards_core::PRICE_UNKNOWN.to_owned(),
        Some(PriceSource::Formatted(text)) => text.clone(),
        Some(PriceSource::Amount { value, currency }) => {
            if !value.is_finite() {
                return prodcards_core::PRICE_UNKNOWN.to_owned();
            }
            let sign = if *value < 0.0 { "-" } else { "" };
            let rendered = format!("{:.2}", value.abs());
            let (int_part, dec_part) = rendered.split_once('.').unwrap_or((&rendered, "00"));
            let suffix = if currency == DEFAULT_CURRENCY {
                "kr".to_owned()
            } else {
                currency.clone()
            };
            format!("{sign}{},{dec_part} {suffix}", group_thousands(int_part))
        }
    }
}

/// Inserts a space between every group of three digits, right to left.
fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(char::from(*byte));
    }
    out
}
