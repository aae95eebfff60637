use serde::Serialize;

/// Sentinel link target used when no product page URL could be determined.
///
/// Renderers treat it as "no link": the call-to-action stays visible but
/// does not navigate.
pub const NO_LINK: &str = "#";

/// Sentinel price text used when no price could be extracted or the
/// extracted amount is not a finite number.
pub const PRICE_UNKNOWN: &str = "—";

/// Display-ready record for one requested product identifier.
///
/// This is the only artifact handed to the external rendering layer. It is
/// immutable once produced and contains no HTML; escaping of free text is
/// the renderer's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationRecord {
    /// The identifier exactly as requested by the caller.
    pub id: String,
    /// Display title. Never empty: falls back to `id` when no source
    /// yields a usable name.
    pub title: String,
    /// Fully-qualified image URL, or empty when no image was found.
    pub image_url: String,
    /// Fully-qualified product page URL, or [`NO_LINK`].
    pub link_url: String,
    /// Human-formatted price string, or [`PRICE_UNKNOWN`].
    pub price_text: String,
    /// Strike-through comparison price. Only set when present upstream
    /// and distinct from `price_text`.
    pub compare_price_text: Option<String>,
    /// EU energy-label data for this product.
    pub energy: EnergyBlock,
}

/// Energy-label fields attached to a [`PresentationRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnergyBlock {
    /// Energy efficiency grade, exactly one of `A`–`G` when present.
    /// Never invented: absent when no source stage yields a valid grade.
    pub grade: Option<char>,
    /// Free-text battery duration, e.g. `"50h Playback"`.
    pub battery: Option<String>,
    /// IP rating string, e.g. `"IP68"`.
    pub ip: Option<String>,
    /// Durability / drop rating, stringified when numeric upstream.
    pub drops: Option<String>,
    /// At most two document URLs: energy label PDF first, product fiche
    /// second.
    pub document_links: Vec<String>,
}

impl EnergyBlock {
    /// Returns `true` when no energy data of any kind was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grade.is_none()
            && self.battery.is_none()
            && self.ip.is_none()
            && self.drops.is_none()
            && self.document_links.is_empty()
    }
}

/// Validates a grade candidate against the `A`–`G` scale.
///
/// Accepts a single-character string (any case) and returns the uppercase
/// grade letter. Anything else (empty, multi-character, out of range) is
/// dropped to `None` rather than surfaced.
#[must_use]
pub fn validate_grade(candidate: &str) -> Option<char> {
    let mut chars = candidate.trim().chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let upper = first.to_ascii_uppercase();
    ('A'..='G').contains(&upper).then_some(upper)
}
