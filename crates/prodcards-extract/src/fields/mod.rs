//! Per-field extraction policies.
//!
//! Each extractor is a pure, total function over a located product record
//! (any `serde_json::Value`, including `Null` for "no record found"). Each
//! owns its candidate path list and normalization rules; fallback defaults
//! (identifier as title, the no-link sentinel) are applied by
//! [`crate::aggregate`], not here.

pub mod energy;
pub mod image;
pub mod link;
pub mod price;
pub mod title;

pub use energy::extract_energy;
pub use image::extract_image;
pub use link::extract_link;
pub use price::{extract_compare_price, extract_price, format_price, PriceSource};
pub use title::extract_title;
