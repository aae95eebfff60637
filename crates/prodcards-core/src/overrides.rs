//! Caller-supplied per-identifier field overrides.
//!
//! ## Observed shape
//!
//! The override document is a JSON object mapping identifier → partial
//! override object. Recognized keys: `title`, `image`, `url`, `price`,
//! `listPrice`, `energyGrade`, `battery`, `ip`, `drops`. Any subset may be
//! present; unrecognized keys are ignored (serde's default behavior for
//! unknown fields). `price` and `listPrice` are already-formatted display
//! strings and are passed through verbatim.
//!
//! Overrides are supplied once per load cycle and consumed, never stored:
//! when an override is present for a field it takes absolute precedence
//! over anything extracted from either upstream source.

use std::collections::HashMap;

use serde::Deserialize;

/// Partial field-override object for one identifier.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CardOverride {
    pub title: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub price: Option<String>,
    #[serde(rename = "listPrice")]
    pub list_price: Option<String>,
    #[serde(rename = "energyGrade")]
    pub energy_grade: Option<String>,
    pub battery: Option<String>,
    pub ip: Option<String>,
    pub drops: Option<String>,
}

/// Mapping from identifier to its override object.
pub type OverrideMap = HashMap<String, CardOverride>;

/// Parses an override document from a JSON string, best-effort.
///
/// Malformed JSON or an unexpected document shape degrades to an empty
/// map; override parsing can never fail a load cycle.
#[must_use]
pub fn parse_overrides(raw: &str) -> OverrideMap {
    serde_json::from_str::<OverrideMap>(raw).unwrap_or_default()
}
