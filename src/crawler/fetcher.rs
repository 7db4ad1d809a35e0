//! HTTP fetcher with typed outcomes and exponential backoff
//!
//! One call fetches one page, bounded by the configured attempt count. The
//! caller never sees an exception-shaped error: every way a fetch can end is
//! a [`FetchOutcome`] variant the engine pattern-matches on.

use crate::session::CrawlSession;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

/// Result of fetching one page
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | HTTP 2xx (after redirects) | `Content` |
/// | HTTP 401 / 403 | `PermanentFailure`, no retry |
/// | Other HTTP 4xx | `PermanentFailure`, no retry |
/// | HTTP 5xx | retried with backoff, then `RetryableFailure` |
/// | Timeout / connect / DNS error | retried with backoff, then `RetryableFailure` |
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page was fetched; body is the final response text
    Content { body: String, status: u16 },

    /// Retrying cannot help (access decision or client-side error)
    PermanentFailure { status: u16, reason: String },

    /// All attempts were used up on transient failures
    RetryableFailure { last_error: String },
}

/// What a single attempt decided
enum Attempt {
    /// Final answer, stop trying
    Done(FetchOutcome),
    /// Transient trouble, worth another attempt
    Retry(String),
}

/// Fetches one page with retry and exponential backoff
///
/// Makes up to `max-retries` attempts. After a transient failure the fetcher
/// sleeps `backoff-base ^ attempt` seconds before the next attempt; nothing
/// is slept after the last one. Permanent failures short-circuit on the
/// first attempt that sees them.
pub async fn fetch_page(session: &CrawlSession, address: &Url) -> FetchOutcome {
    let config = &session.config().crawler;
    let max_attempts = config.max_retries;
    let mut last_error = String::new();

    for attempt in 1..=max_attempts {
        match attempt_fetch(session, address).await {
            Attempt::Done(outcome) => return outcome,
            Attempt::Retry(error) => {
                tracing::warn!(
                    "Attempt {}/{} for {} failed: {}",
                    attempt,
                    max_attempts,
                    address,
                    error
                );
                last_error = error;

                if attempt < max_attempts {
                    let pause = backoff_delay(config.backoff_base, attempt);
                    tracing::debug!("Backing off {:?} before retrying {}", pause, address);
                    tokio::time::sleep(pause).await;
                }
            }
        }
    }

    FetchOutcome::RetryableFailure { last_error }
}

/// Performs one network attempt and classifies the result
async fn attempt_fetch(session: &CrawlSession, address: &Url) -> Attempt {
    let response = match session.request(address.clone()).send().await {
        Ok(response) => response,
        Err(e) => return Attempt::Retry(describe_transport_error(&e)),
    };

    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Attempt::Done(FetchOutcome::PermanentFailure {
            status: status.as_u16(),
            reason: "401 Unauthorized: check credentials".to_string(),
        });
    }

    if status == StatusCode::FORBIDDEN {
        return Attempt::Done(FetchOutcome::PermanentFailure {
            status: status.as_u16(),
            reason: "403 Forbidden: access denied by server".to_string(),
        });
    }

    if status.is_client_error() {
        return Attempt::Done(FetchOutcome::PermanentFailure {
            status: status.as_u16(),
            reason: format!("client error {}", status),
        });
    }

    if status.is_server_error() {
        return Attempt::Retry(format!("server error {}", status));
    }

    if status.is_success() {
        return match response.text().await {
            Ok(body) => Attempt::Done(FetchOutcome::Content {
                body,
                status: status.as_u16(),
            }),
            Err(e) => Attempt::Retry(format!("failed to read body: {}", e)),
        };
    }

    // Residual 1xx/3xx after the redirect policy ran its course
    Attempt::Done(FetchOutcome::PermanentFailure {
        status: status.as_u16(),
        reason: format!("unexpected status {}", status),
    })
}

/// Sleep before the attempt after `attempt` (1-based) failed
fn backoff_delay(base: u32, attempt: u32) -> Duration {
    Duration::from_secs(u64::from(base).saturating_pow(attempt))
}

/// Maps reqwest's error classes onto short, loggable descriptions
fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else if error.is_redirect() {
        format!("redirect policy violated: {}", error)
    } else {
        error.to_string()
    }
}
