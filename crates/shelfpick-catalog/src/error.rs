use thiserror::Error;

/// Errors raised while fetching a page from the product catalog.
///
/// These never reach the picker: [`crate::CatalogSearch`] degrades every
/// error to an empty page.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by catalog (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// 401/403: the `x-api-key` header was rejected.
    #[error("catalog rejected the API key (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid catalog base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
