pub mod aggregate;
pub mod fields;
pub mod locate;
pub mod paths;
pub mod scan;

pub use aggregate::aggregate;
pub use locate::{locate_detail, locate_simple};
pub use paths::resolve_first;
pub use scan::deep_find;
