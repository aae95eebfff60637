/// Application configuration for the product-card loader.
///
/// Every field has a working default; configuration exists so deployments
/// can point the loader at a proxy (the simple endpoint is usually served
/// through one to avoid CORS on the storefront) and tune HTTP behavior.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the "detail" card API (rich per-product metadata).
    pub detail_endpoint: String,
    /// Base URL of the "simple" API (primarily pricing, keyed by identifier).
    pub simple_endpoint: String,
    /// Per-request timeout in seconds for both upstream APIs.
    pub request_timeout_secs: u64,
    /// `User-Agent` header sent with upstream requests.
    pub user_agent: String,
    /// Locale used when the caller supplies none.
    pub default_locale: String,
    /// Log level hint for whatever subscriber the embedding process installs.
    pub log_level: String,
}
