//! Remote catalog API client.

use crate::error::{FetchError, Result};
use crate::source::{parse_catalog_document, CatalogSource};
use async_trait::async_trait;
use controlscope_core::{CatalogConfig, Control};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Catalog source backed by the remote catalog API.
///
/// Endpoints are tried in order; the first one answering with a usable
/// catalog document wins. Each request is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    base_url: String,
    endpoints: Vec<String>,
    timeout: Duration,
}

impl HttpCatalogSource {
    /// Create a new source.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        base_url: impl Into<String>,
        endpoints: Vec<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("controlscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Unavailable {
                origin: base_url.clone(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            endpoints,
            timeout,
        })
    }

    /// Create a source from the catalog configuration section.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            config.endpoints.clone(),
            config.timeout(),
        )
    }

    /// Full URLs in the order they are tried.
    #[must_use]
    pub fn endpoint_urls(&self) -> Vec<String> {
        let base = self.base_url.trim_end_matches('/');
        self.endpoints
            .iter()
            .map(|path| {
                if path.starts_with('/') {
                    format!("{base}{path}")
                } else {
                    format!("{base}/{path}")
                }
            })
            .collect()
    }

    async fn fetch_endpoint(&self, url: &str) -> Result<Vec<Control>> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        parse_catalog_document(url, &body)
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                after: self.timeout,
            }
        } else {
            FetchError::Http {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<Control>> {
        let urls = self.endpoint_urls();
        let mut last_error = None;

        for url in &urls {
            debug!(url = %url, "requesting control catalog");

            match self.fetch_endpoint(url).await {
                Ok(controls) => {
                    info!(url = %url, count = controls.len(), "fetched remote control catalog");
                    return Ok(controls);
                }
                Err(e) => {
                    debug!(url = %url, error = %e, "catalog endpoint failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => Err(FetchError::Exhausted {
                attempts: urls.len(),
                last: Box::new(last),
            }),
            None => Err(FetchError::Unavailable {
                origin: self.base_url.clone(),
                reason: "no catalog endpoints configured".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls_join_paths() {
        let source = HttpCatalogSource::new(
            "https://catalog.example/api/",
            vec!["/controls".to_string(), "v2/controls".to_string()],
            Duration::from_secs(1),
        )
        .expect("create source");

        assert_eq!(
            source.endpoint_urls(),
            vec![
                "https://catalog.example/api/controls".to_string(),
                "https://catalog.example/api/v2/controls".to_string(),
            ]
        );
    }

    #[test]
    fn test_from_config_uses_defaults() {
        let source = HttpCatalogSource::from_config(&CatalogConfig::default()).expect("create");
        assert_eq!(source.timeout, Duration::from_secs(30));
        assert_eq!(
            source.endpoint_urls()[0],
            "https://csrc.nist.gov/api/csrc/v1/controls/sp800-53/r5"
        );
    }

    #[tokio::test]
    async fn test_no_endpoints_is_unavailable() {
        let source =
            HttpCatalogSource::new("http://127.0.0.1:9", Vec::new(), Duration::from_secs(1))
            .expect("create source");
        let err = source.fetch().await.expect_err("no endpoints must fail");
        assert!(matches!(err, FetchError::Unavailable { .. }));
    }
}
