use prodcards_core::EnergyBlock;
use regex::Regex;
use serde_json::Value;

use crate::paths::resolve_first;
use crate::scan::{deep_find, last_key};

/// CDN base for synthesized energy-label document URLs. The path layout is
/// a de-facto external contract and must not change.
const LABEL_CDN_BASE: &str = "https://images.samsung.com/is/content/samsung/p6/common/energylabel";

const GRADE_PATHS: [&[&str]; 9] = [
    &["energyLabelGrade"],
    &["energyGrade"],
    &["energyClass"],
    &["energyEfficiencyClass"],
    &["euEnergyGrade"],
    &["euEnergyClass"],
    &["energy", "grade"],
    &["energyLabel", "grade"],
    &["euEnergy", "grade"],
];

const BADGE_CLASS_PATHS: [&[&str]; 2] = [&["energyLabelClass1"], &["energyLabelClass2"]];

const ATTRIBUTE_LIST_PATHS: [&[&str]; 5] = [
    &["attributes"],
    &["specs"],
    &["specifications"],
    &["keySpecs"],
    &["badges"],
];

const LABEL_FILE_PATHS: [&[&str]; 3] = [
    &["energyFileUrl"],
    &["euEnergyLabelUrl"],
    &["energyLabel", "url"],
];

const FICHE_FILE_PATHS: [&[&str]; 3] = [
    &["ficheFileUrl"],
    &["productFicheUrl"],
    &["productFiche", "url"],
];

/// Extracts the energy-label block from a product record.
///
/// The grade runs through a multi-stage fallback chain, each stage
/// attempted only when the previous one yields nothing: direct grade
/// fields, CSS badge class strings, attribute/spec list entries, a letter
/// embedded in a label document URL, and finally a whole-record scan for
/// `class <letter>` text under an energy-named key. A grade is never
/// invented: when every stage misses it stays absent.
///
/// Battery, IP rating, and drop rating are independent whole-record scans.
/// Document links prefer explicit label and fiche URLs; when neither is
/// present a single label URL is synthesized from `id` and `locale`.
#[must_use]
pub fn extract_energy(product: &Value, id: &str, locale: &str) -> EnergyBlock {
    let document_links = document_links(product, id, locale);

    let grade = grade_from_direct_fields(product)
        .or_else(|| grade_from_badge_classes(product))
        .or_else(|| grade_from_attribute_lists(product))
        .or_else(|| grade_from_label_urls(&document_links))
        .or_else(|| grade_from_text_scan(product));

    EnergyBlock {
        grade,
        battery: scan_battery(product),
        ip: scan_ip_rating(product),
        drops: scan_drop_rating(product),
        document_links,
    }
}

/// Coerces free text to a grade letter.
///
/// Matches the first standalone single letter in the A-G range, so
/// `"Class G"` yields `G` and `"badge-energy-label__badge--b"` yields `B`,
/// while `"H"` or prose without a lone grade letter yields nothing.
fn coerce_grade(text: &str) -> Option<char> {
    let letter_re = Regex::new(r"(?i)\b([A-G])\b").expect("valid regex");
    letter_re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .map(|c| c.to_ascii_uppercase())
}

fn grade_from_direct_fields(product: &Value) -> Option<char> {
    resolve_first(product, &GRADE_PATHS)
        .and_then(Value::as_str)
        .and_then(coerce_grade)
}

fn grade_from_badge_classes(product: &Value) -> Option<char> {
    let badge_re = Regex::new(r"(?i)badge--([a-g])\b").expect("valid regex");
    BADGE_CLASS_PATHS.iter().find_map(|path| {
        let class = resolve_first(product, &[path]).and_then(Value::as_str)?;
        let letter = badge_re.captures(class)?.get(1)?.as_str();
        letter.chars().next().map(|c| c.to_ascii_uppercase())
    })
}

fn grade_from_attribute_lists(product: &Value) -> Option<char> {
    let key_re = Regex::new(r"(?i)energy|efficiency|label").expect("valid regex");
    ATTRIBUTE_LIST_PATHS.iter().find_map(|path| {
        let entries = resolve_first(product, &[path])?.as_array()?;
        entries.iter().find_map(|entry| {
            let key = resolve_first(entry, &[&["code"], &["name"], &["key"]])
                .and_then(Value::as_str)?;
            if !key_re.is_match(key) {
                return None;
            }
            resolve_first(entry, &[&["value"], &["displayValue"], &["text"]])
                .and_then(Value::as_str)
                .and_then(coerce_grade)
        })
    })
}

/// Weak heuristic: some label PDFs carry the grade letter in the file name.
fn grade_from_label_urls(links: &[String]) -> Option<char> {
    let url_re = Regex::new(r"(?i)-([a-g])-(?:[^/]+-)?energylabel\.pdf$").expect("valid regex");
    links.iter().find_map(|link| {
        let letter = url_re.captures(link)?.get(1)?.as_str();
        letter.chars().next().map(|c| c.to_ascii_uppercase())
    })
}

fn grade_from_text_scan(product: &Value) -> Option<char> {
    let key_re = Regex::new(r"(?i)energy|efficiency").expect("valid regex");
    let class_re = Regex::new(r"(?i)class\s*([A-G])\b").expect("valid regex");
    let (found, _) = deep_find(product, |node, path| {
        key_re.is_match(last_key(path)) && node.as_str().is_some_and(|s| class_re.is_match(s))
    })?;
    let letter = class_re.captures(found.as_str()?)?.get(1)?.as_str();
    letter.chars().next().map(|c| c.to_ascii_uppercase())
}

fn scan_battery(product: &Value) -> Option<String> {
    let key_re = Regex::new(r"(?i)battery|playback|endurance|hours").expect("valid regex");
    let hours_re = Regex::new(r"(?i)\b\d+\s?h(?:ours)?\b").expect("valid regex");
    let (found, _) = deep_find(product, |node, path| {
        key_re.is_match(last_key(path)) && node.as_str().is_some_and(|s| hours_re.is_match(s))
    })?;
    found.as_str().map(str::to_owned)
}

fn scan_ip_rating(product: &Value) -> Option<String> {
    let ip_re = Regex::new(r"^IP\d{2}").expect("valid regex");
    let (found, _) = deep_find(product, |node, _| {
        node.as_str().is_some_and(|s| ip_re.is_match(s))
    })?;
    found.as_str().map(str::to_owned)
}

fn scan_drop_rating(product: &Value) -> Option<String> {
    let key_re = Regex::new(r"(?i)drop|fall").expect("valid regex");
    let (found, _) = deep_find(product, |node, path| {
        key_re.is_match(last_key(path)) && (node.is_string() || node.is_number())
    })?;
    match found {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Collects up to two document links: label first, fiche second.
///
/// Explicit API-provided URLs always win. Only when both are missing is a
/// single guessed label URL synthesized for the requested locale.
fn document_links(product: &Value, id: &str, locale: &str) -> Vec<String> {
    let label = resolve_first(product, &LABEL_FILE_PATHS)
        .and_then(Value::as_str)
        .map(str::to_owned);
    let fiche = resolve_first(product, &FICHE_FILE_PATHS)
        .and_then(Value::as_str)
        .map(str::to_owned);

    let mut links: Vec<String> = label.into_iter().chain(fiche).collect();
    if links.is_empty() {
        if let Some(guess) = guessed_label_urls(id, locale).into_iter().next() {
            links.push(guess);
        }
    }
    links.truncate(2);
    links
}

/// Candidate label URLs for locales in preference order: the requested
/// locale, then the EU fallback, then the UK fallback.
fn guessed_label_urls(id: &str, locale: &str) -> Vec<String> {
    let id = id.to_lowercase();
    [locale, "eu", "uk"]
        .iter()
        .map(|loc| format!("{LABEL_CDN_BASE}/{loc}-energylabel-{id}-energylabel.pdf"))
        .collect()
}

#[cfg(test)]
#[path = "energy_test.rs"]
mod tests;
