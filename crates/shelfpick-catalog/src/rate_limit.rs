//! Retry with exponential back-off and jitter for catalog page requests.
//!
//! Transient failures (429, network errors, 5xx) are retried; everything else
//! is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` for errors worth retrying after a back-off delay.
///
/// Not retriable: [`CatalogError::Unauthorized`], [`CatalogError::Deserialize`],
/// [`CatalogError::InvalidBaseUrl`] and 4xx statuses other than 429.
pub(crate) fn is_retriable(err: &CatalogError) -> bool {
    match err {
        CatalogError::RateLimited { .. } => true,
        CatalogError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        CatalogError::UnexpectedStatus { status, .. } => *status >= 500,
        CatalogError::Unauthorized { .. }
        | CatalogError::Deserialize { .. }
        | CatalogError::InvalidBaseUrl { .. } => false,
    }
}

/// Calls `operation` until it succeeds, fails with a non-transient error, or
/// has been retried `max_retries` times.
///
/// Back-off schedule with `backoff_base_ms = 500`:
///
/// | Attempt | Sleep before next attempt     |
/// |---------|-------------------------------|
/// | 1       | 500 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 500 ms × 2¹ ± 25 % jitter     |
/// | 3       | 500 ms × 2² ± 25 % jitter     |
///
/// Delay is capped at 30 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let exponent = (attempt - 1).min(10);
                let capped = backoff_base_ms
                    .saturating_mul(2u64.pow(exponent))
                    .min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient catalog error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn rate_limited() -> CatalogError {
        CatalogError::RateLimited {
            retry_after_secs: 0,
        }
    }

    fn server_error(status: u16) -> CatalogError {
        CatalogError::UnexpectedStatus {
            status,
            url: "https://catalog.test/task/products/search".to_owned(),
        }
    }

    #[test]
    fn server_errors_are_retriable() {
        assert!(is_retriable(&server_error(503)));
        assert!(is_retriable(&rate_limited()));
    }

    #[test]
    fn client_errors_are_not_retriable() {
        assert!(!is_retriable(&server_error(404)));
        assert!(!is_retriable(&CatalogError::Unauthorized { status: 401 }));
    }

    #[test]
    fn malformed_page_is_not_retriable() {
        let source = serde_json::from_str::<Vec<u32>>("{\"products\": 1}").unwrap_err();
        assert!(!is_retriable(&CatalogError::Deserialize {
            context: "search page".to_owned(),
            source,
        }));
    }

    /// Runs `retry_with_backoff` against a fixed sequence of outcomes and
    /// reports how many of them were consumed.
    async fn run_script(
        max_retries: u32,
        outcomes: Vec<Result<u32, CatalogError>>,
    ) -> (Result<u32, CatalogError>, usize) {
        let total = outcomes.len();
        let mut pending: VecDeque<_> = outcomes.into();
        let result = retry_with_backoff(max_retries, 0, || {
            let next = pending
                .pop_front()
                .unwrap_or_else(|| panic!("operation called more than {total} times"));
            async move { next }
        })
        .await;
        (result, total - pending.len())
    }

    #[tokio::test]
    async fn first_success_is_returned_without_retry() {
        let (result, attempts) = run_script(3, vec![Ok(42)]).await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn rate_limit_then_success() {
        let (result, attempts) =
            run_script(3, vec![Err(rate_limited()), Err(rate_limited()), Ok(7)]).await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let (result, attempts) = run_script(
            1,
            vec![
                Err(server_error(502)),
                Err(server_error(503)),
                Ok(1),
            ],
        )
        .await;
        assert!(matches!(
            result,
            Err(CatalogError::UnexpectedStatus { status: 503, .. })
        ));
        assert_eq!(attempts, 2);
    }

    #[tokio::test]
    async fn forbidden_is_returned_on_first_attempt() {
        let (result, attempts) = run_script(
            3,
            vec![Err(CatalogError::Unauthorized { status: 403 }), Ok(1)],
        )
        .await;
        assert!(matches!(result, Err(CatalogError::Unauthorized { status: 403 })));
        assert_eq!(attempts, 1);
    }
}
