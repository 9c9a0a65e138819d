//! Bounded exponential-backoff retry for data fetches.
//!
//! The dashboard renders a default while data is missing, so retries
//! are a bounded strengthening rather than a liveness requirement:
//! after `max_attempts` failures the last error is returned and the
//! caller falls back to its default.

use std::time::Duration;

use covdash_core::row::AreaRow;
use tokio_util::sync::CancellationToken;

use crate::api::ApiError;
use crate::query::DataQuery;
use crate::source::DataSource;

/// Tunable parameters for the exponential-backoff strategy.
pub struct RetryConfig {
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            max_attempts: 3,
        }
    }
}

/// Calculate the next backoff delay from the current delay and config.
///
/// The result is clamped to [`RetryConfig::max_delay`].
pub fn next_delay(current: Duration, config: &RetryConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// Fetch rows, retrying failed attempts with exponential backoff.
///
/// Returns the first successful result, or the last error once
/// `max_attempts` is exhausted or the `cancel` token fires between
/// attempts.
pub async fn fetch_rows_with_retry(
    source: &dyn DataSource,
    query: &DataQuery,
    config: &RetryConfig,
    cancel: &CancellationToken,
) -> Result<Vec<AreaRow>, ApiError> {
    let mut delay = config.initial_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        match source.fetch_rows(query).await {
            Ok(rows) => return Ok(rows),
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts = config.max_attempts,
                    error = %e,
                    "Data fetch attempt failed",
                );

                if attempt >= config.max_attempts {
                    return Err(e);
                }

                // Wait before the next attempt, respecting cancellation.
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!(attempt, "Fetch retry cancelled");
                        return Err(e);
                    }
                    _ = tokio::time::sleep(delay) => {}
                }

                delay = next_delay(delay, config);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
