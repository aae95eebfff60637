use std::time::Duration;

use prodcards_core::AppConfig;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::ClientError;

/// HTTP client for the two upstream product APIs.
///
/// The "detail" API returns rich per-product metadata for a model list; the
/// "simple" API returns primarily pricing, keyed by product code. Both
/// responses are kept as raw [`Value`] documents: their shapes drift across
/// locales and API versions, so decoding into fixed structs happens nowhere.
pub struct CardApiClient {
    client: Client,
    detail_endpoint: Url,
    simple_endpoint: Url,
}

impl CardApiClient {
    /// Creates a client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if either endpoint is not a
    /// valid absolute URL, or [`ClientError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        detail_endpoint: &str,
        simple_endpoint: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            detail_endpoint: parse_endpoint(detail_endpoint)?,
            simple_endpoint: parse_endpoint(simple_endpoint)?,
        })
    }

    /// Creates a client from a loaded [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            &config.detail_endpoint,
            &config.simple_endpoint,
        )
    }

    /// Fetches the detail document for the given model list and locale.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network or timeout failure.
    /// - [`ClientError::UnexpectedStatus`] on any non-2xx response.
    /// - [`ClientError::Deserialize`] when the body is not valid JSON.
    pub async fn fetch_detail(&self, ids: &[String], locale: &str) -> Result<Value, ClientError> {
        let mut url = self.detail_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("siteCode", locale)
            .append_pair("modelList", &ids.join(","))
            .append_pair("saleSkuYN", "N")
            .append_pair("onlyRequestSkuYN", "Y");
        self.fetch_document(url, "detail response").await
    }

    /// Fetches the simple (pricing) document for the given product codes.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_detail`].
    pub async fn fetch_simple(&self, ids: &[String]) -> Result<Value, ClientError> {
        let mut url = self.simple_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("productCodes", &ids.join(","));
        self.fetch_document(url, "simple response").await
    }

    async fn fetch_document(&self, url: Url, context: &str) -> Result<Value, ClientError> {
        tracing::debug!(%url, "fetching source document");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ClientError> {
    Url::parse(endpoint).map_err(|_| ClientError::InvalidEndpoint {
        url: endpoint.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_endpoint() {
        let result = CardApiClient::new(5, "test", "https://api.example/detail", "/wp-json/simple");
        assert!(matches!(
            result,
            Err(ClientError::InvalidEndpoint { url }) if url == "/wp-json/simple"
        ));
    }

    #[test]
    fn accepts_absolute_endpoints() {
        let result = CardApiClient::new(
            5,
            "test",
            "https://api.example/detail",
            "https://shop.example/wp-json/simple",
        );
        assert!(result.is_ok());
    }
}
