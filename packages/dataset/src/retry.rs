//! HTTP retry helper for transient errors.
//!
//! Fetchers should go through [`send_text`] instead of calling
//! `reqwest::RequestBuilder::send()` directly, so every request gets
//! automatic retry with exponential backoff for transient failures
//! (timeouts, connection resets, server errors, rate limiting).

use std::time::Duration;

use crate::DatasetError;

/// Sends an HTTP request and returns the response body as a `String`.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`.
///
/// Retries connection errors, timeouts, HTTP 429, and HTTP 5xx up to
/// `max_retries` times with exponential backoff (2s, 4s, 8s, ...). Other
/// 4xx statuses are permanent and fail immediately.
///
/// # Errors
///
/// Returns [`DatasetError`] if the request still fails after all retries,
/// the server returns a non-retryable status, or the body cannot be read.
#[allow(clippy::future_not_send)]
pub async fn send_text<F>(build_request: F, max_retries: u32) -> Result<String, DatasetError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let response = send_inner(&build_request, max_retries).await?;
    Ok(response.text().await?)
}

/// Core retry loop: sends the request built by `build_request`, retrying
/// transient errors, and returns the successful response.
#[allow(clippy::future_not_send)]
async fn send_inner<F>(
    build_request: &F,
    max_retries: u32,
) -> Result<reqwest::Response, DatasetError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt); // 2s, 4s, 8s
            log::warn!("  retry {attempt}/{max_retries} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && attempt < max_retries {
                    log::warn!("  transient error: {e}");
                    attempt += 1;
                    continue;
                }
                return Err(DatasetError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                // 429 and 5xx are worth retrying; other 4xx are permanent.
                let retryable = status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    || status.is_server_error();

                if retryable && attempt < max_retries {
                    log::warn!("  HTTP {status}");
                    attempt += 1;
                    continue;
                }

                if !status.is_success() {
                    return Err(DatasetError::Status {
                        status,
                        url: response.url().to_string(),
                    });
                }

                return Ok(response);
            }
        }
    }
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_decode() || e.is_request()
}
