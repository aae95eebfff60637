use prodcards_core::{
    validate_grade, CardOverride, OverrideMap, PresentationRecord, NO_LINK, PRICE_UNKNOWN,
};
use serde_json::Value;

use crate::fields::{
    extract_compare_price, extract_energy, extract_image, extract_link, extract_price,
    extract_title, format_price, PriceSource,
};
use crate::locate::{locate_detail, locate_simple};

/// Stand-in record for a source that did not yield a product object.
/// Extractors treat it like any other shapeless value and miss cleanly.
static NULL_RECORD: Value = Value::Null;

/// Merges both source documents and the override map into one presentation
/// record per requested identifier.
///
/// Output length and order match `ids` exactly, duplicates included. Either
/// document may be absent; a missing product within a present document is
/// equally fine. Title, image, and link prefer the detail source; price
/// fields prefer the simple source. An override always wins over any
/// extracted value for its field.
#[must_use]
pub fn aggregate(
    ids: &[String],
    detail_doc: Option<&Value>,
    simple_doc: Option<&Value>,
    overrides: &OverrideMap,
    locale: &str,
) -> Vec<PresentationRecord> {
    let records: Vec<PresentationRecord> = ids
        .iter()
        .map(|id| build_record(id, detail_doc, simple_doc, overrides.get(id), locale))
        .collect();
    tracing::debug!(
        requested = ids.len(),
        produced = records.len(),
        "aggregated presentation records"
    );
    records
}

fn build_record(
    id: &str,
    detail_doc: Option<&Value>,
    simple_doc: Option<&Value>,
    overrides: Option<&CardOverride>,
    locale: &str,
) -> PresentationRecord {
    let detail_item = detail_doc.and_then(|doc| locate_detail(doc, id));
    let simple_item = simple_doc.and_then(|doc| locate_simple(doc, id));
    tracing::debug!(
        id,
        detail_found = detail_item.is_some(),
        simple_found = simple_item.is_some(),
        "located product records"
    );
    let detail = detail_item.unwrap_or(&NULL_RECORD);
    let simple = simple_item.unwrap_or(&NULL_RECORD);

    let title = override_field(overrides, |o| o.title.as_ref())
        .or_else(|| extract_title(detail))
        .or_else(|| extract_title(simple))
        .unwrap_or_else(|| id.to_owned());

    let image_url = override_field(overrides, |o| o.image.as_ref())
        .or_else(|| extract_image(detail))
        .or_else(|| extract_image(simple))
        .unwrap_or_default();

    let link_url = override_field(overrides, |o| o.url.as_ref())
        .or_else(|| extract_link(detail))
        .or_else(|| extract_link(simple))
        .unwrap_or_else(|| NO_LINK.to_owned());

    let price = override_field(overrides, |o| o.price.as_ref())
        .map(PriceSource::Formatted)
        .or_else(|| extract_price(simple))
        .or_else(|| extract_price(detail));
    let price_text = format_price(price.as_ref());

    let compare = override_field(overrides, |o| o.list_price.as_ref())
        .map(PriceSource::Formatted)
        .or_else(|| extract_compare_price(simple))
        .or_else(|| extract_compare_price(detail));
    let compare_price_text = compare
        .as_ref()
        .map(|source| format_price(Some(source)))
        .filter(|text| text != &price_text && text != PRICE_UNKNOWN);

    // Energy runs against one source only: the detail record when it was
    // located, otherwise the simple record.
    let energy_source = if detail_item.is_some() { detail } else { simple };
    let mut energy = extract_energy(energy_source, id, locale);
    if let Some(o) = overrides {
        if let Some(grade) = &o.energy_grade {
            energy.grade = validate_grade(grade);
        }
        if let Some(battery) = &o.battery {
            energy.battery = Some(battery.clone());
        }
        if let Some(ip) = &o.ip {
            energy.ip = Some(ip.clone());
        }
        if let Some(drops) = &o.drops {
            energy.drops = Some(drops.clone());
        }
    }

    PresentationRecord {
        id: id.to_owned(),
        title,
        image_url,
        link_url,
        price_text,
        compare_price_text,
        energy,
    }
}

fn override_field<F>(overrides: Option<&CardOverride>, pick: F) -> Option<String>
where
    F: Fn(&CardOverride) -> Option<&String>,
{
    overrides.and_then(|o| pick(o).cloned())
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
