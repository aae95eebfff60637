use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_DETAIL_ENDPOINT: &str =
    "https://searchapi.samsung.com/v6/front/b2c/product/card/detail/hybris";
const DEFAULT_SIMPLE_ENDPOINT: &str =
    "https://shop.samsung.com/se/wp-json/samsung/v1/simple-product-info";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup, no `set_var`/`remove_var`
/// needed. Every variable is optional; missing ones fall back to defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let detail_endpoint = or_default("PRODCARDS_DETAIL_ENDPOINT", DEFAULT_DETAIL_ENDPOINT);
    let simple_endpoint = or_default("PRODCARDS_SIMPLE_ENDPOINT", DEFAULT_SIMPLE_ENDPOINT);
    let request_timeout_secs = parse_u64("PRODCARDS_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("PRODCARDS_USER_AGENT", "prodcards/0.1 (product-cards)");
    let default_locale = or_default("PRODCARDS_DEFAULT_LOCALE", "se").to_lowercase();
    let log_level = or_default("PRODCARDS_LOG_LEVEL", "info");

    Ok(AppConfig {
        detail_endpoint,
        simple_endpoint,
        request_timeout_secs,
        user_agent,
        default_locale,
        log_level,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults must suffice");
        assert_eq!(cfg.detail_endpoint, DEFAULT_DETAIL_ENDPOINT);
        assert_eq!(cfg.simple_endpoint, DEFAULT_SIMPLE_ENDPOINT);
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.user_agent, "prodcards/0.1 (product-cards)");
        assert_eq!(cfg.default_locale, "se");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn build_app_config_overrides_endpoints() {
        let mut map = HashMap::new();
        map.insert("PRODCARDS_DETAIL_ENDPOINT", "https://proxy.local/detail");
        map.insert("PRODCARDS_SIMPLE_ENDPOINT", "https://proxy.local/simple");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.detail_endpoint, "https://proxy.local/detail");
        assert_eq!(cfg.simple_endpoint, "https://proxy.local/simple");
    }

    #[test]
    fn build_app_config_lowercases_default_locale() {
        let mut map = HashMap::new();
        map.insert("PRODCARDS_DEFAULT_LOCALE", "EU");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.default_locale, "eu");
    }

    #[test]
    fn build_app_config_timeout_override() {
        let mut map = HashMap::new();
        map.insert("PRODCARDS_REQUEST_TIMEOUT_SECS", "30");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn build_app_config_timeout_invalid() {
        let mut map = HashMap::new();
        map.insert("PRODCARDS_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRODCARDS_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(PRODCARDS_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }
}
