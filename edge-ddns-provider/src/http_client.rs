//! Shared HTTP plumbing for the adapters
//!
//! Every adapter signs and builds its own `RequestBuilder`; this module only
//! sends it, classifies transport failures and reads the body. Response
//! envelopes are left to the adapter because each backend reports errors
//! differently.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Upper bound for a server-supplied `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Upper bound for exponential backoff.
const MAX_BACKOFF_MS: u64 = 10_000;

pub struct HttpUtils;

impl HttpUtils {
    /// Send a request and return `(status, body)`.
    ///
    /// Timeouts become [`ProviderError::Timeout`], connection failures and
    /// 502/503/504 become [`ProviderError::NetworkError`], 429 becomes
    /// [`ProviderError::RateLimited`]. Every other status is handed back to
    /// the caller together with the body.
    pub async fn execute(
        request: RequestBuilder,
        provider: &str,
        label: &str,
    ) -> Result<(u16, String)> {
        log::debug!("[{provider}] -> {label}");

        let response = request.send().await.map_err(|e| transport_error(provider, &e))?;

        let status = response.status().as_u16();
        log::debug!("[{provider}] <- {label}: HTTP {status}");

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider}] {label} throttled, retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
            });
        }

        if matches!(status, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider}] {label} upstream gateway error (HTTP {status})");
            return Err(ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
            });
        }

        let body = response.text().await.map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("failed to read response body: {e}"),
        })?;

        log::debug!("[{provider}] body: {}", truncate_for_log(&body));

        Ok((status, body))
    }

    /// Like [`execute`](Self::execute), retrying transient failures up to
    /// `max_retries` times with exponential backoff (100ms, 200ms, 400ms, ...).
    ///
    /// `build` runs once per attempt so signed requests get a fresh
    /// timestamp and nonce every time.
    pub async fn execute_with_retry<F>(
        mut build: F,
        provider: &str,
        label: &str,
        max_retries: u32,
    ) -> Result<(u16, String)>
    where
        F: FnMut() -> Result<RequestBuilder>,
    {
        let mut attempt = 0;
        loop {
            match Self::execute(build()?, provider, label).await {
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{provider}] {label} failed (attempt {}/{}), retrying in {:.1}s: {e}",
                        attempt + 1,
                        max_retries + 1,
                        delay.as_secs_f32(),
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Decode a JSON body, logging a truncated copy on failure.
    pub fn parse_json<T: DeserializeOwned>(body: &str, provider: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider}] JSON parse failed: {e}; body: {}",
                truncate_for_log(body)
            );
            ProviderError::ParseError {
                provider: provider.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn transport_error(provider: &str, e: &reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: e.to_string(),
        }
    }
}

fn is_retryable(error: &ProviderError) -> bool {
    matches!(
        error,
        ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
    )
}

fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    match error {
        ProviderError::RateLimited {
            retry_after: Some(secs),
            ..
        } => Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS)),
        _ => backoff_delay(attempt),
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let ms = 100_u64.saturating_mul(1_u64 << attempt.min(20));
    Duration::from_millis(ms.min(MAX_BACKOFF_MS))
}
