//! HTTP client for the catalog product search endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use shelfpick_core::{AppConfig, ProductEntry};

use crate::error::CatalogError;
use crate::normalize::{decode_records, normalize_page};
use crate::rate_limit::retry_with_backoff;
use crate::types::CatalogProduct;

const SEARCH_PATH: &str = "task/products/search";
const API_KEY_HEADER: &str = "x-api-key";
const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Client for the paginated catalog search endpoint.
///
/// Pages are 1-based. Transient errors (429, network failures, 5xx) are
/// retried with exponential backoff; retries are off unless configured with
/// [`CatalogClient::with_retry_policy`].
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    api_key: String,
    page_limit: u32,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .field("page_limit", &self.page_limit)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Creates a client for the catalog at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joining the search path appends to
        // the base instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
            page_limit: DEFAULT_PAGE_LIMIT,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Creates a client from the application config, including page size and
    /// retry policy.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(
            &config.catalog_base_url,
            &config.catalog_api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_page_limit(config.page_limit)
        .with_retry_policy(config.max_retries, config.retry_backoff_base_ms))
    }

    #[must_use]
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    /// `max_retries` is the number of additional attempts after the first
    /// failure; the wait before the n-th retry is roughly
    /// `backoff_base_ms * 2^(n-1)` milliseconds.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches one page of search results. Page numbers below 1 are treated
    /// as page 1.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`] — HTTP 429 after all retries.
    /// - [`CatalogError::Unauthorized`] — HTTP 401/403 (not retried).
    /// - [`CatalogError::UnexpectedStatus`] — any other non-2xx (5xx retried).
    /// - [`CatalogError::Http`] — network or TLS failure after all retries.
    /// - [`CatalogError::Deserialize`] — body is not a product array or `null`.
    pub async fn search_page(
        &self,
        term: &str,
        page: u32,
    ) -> Result<Vec<ProductEntry>, CatalogError> {
        let url = self.search_url(term, page)?;

        let raw = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.request_page(url).await }
        })
        .await?;

        Ok(normalize_page(raw))
    }

    async fn request_page(&self, url: Url) -> Result<Vec<CatalogProduct>, CatalogError> {
        let response = self
            .client
            .get(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(CatalogError::RateLimited { retry_after_secs });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(CatalogError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        // Past the last page the endpoint answers `null` rather than `[]`.
        // Records are decoded one at a time so a single bad record does not
        // take the rest of the page down with it.
        let records = serde_json::from_str::<Option<Vec<serde_json::Value>>>(&body).map_err(|e| {
            CatalogError::Deserialize {
                context: format!("search page {url}"),
                source: e,
            }
        })?;
        Ok(decode_records(records.unwrap_or_default()))
    }

    /// Builds the search URL with percent-encoded query parameters.
    fn search_url(&self, term: &str, page: u32) -> Result<Url, CatalogError> {
        let mut url =
            self.base_url
                .join(SEARCH_PATH)
                .map_err(|e| CatalogError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut()
            .append_pair("search", term)
            .append_pair("page", &page.max(1).to_string())
            .append_pair("limit", &self.page_limit.to_string());
        Ok(url)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
