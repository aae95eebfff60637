use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod overrides;
pub mod records;
pub mod request;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use overrides::{parse_overrides, CardOverride, OverrideMap};
pub use records::{validate_grade, EnergyBlock, PresentationRecord, NO_LINK, PRICE_UNKNOWN};
pub use request::{cache_key, normalize_locale, parse_identifiers};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
