//! Exponential backoff for transient feed fetch failures.

use std::future::Future;
use std::time::Duration;

use crate::error::FeedError;

/// Returns `true` if `err` is worth retrying: network failures, 429, and 5xx.
///
/// Client errors, oversized bodies, and bad URLs return the same result on
/// every attempt and are propagated immediately.
fn is_retriable(err: &FeedError) -> bool {
    match err {
        FeedError::Http(_) => true,
        FeedError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        FeedError::FeedTooLarge { .. }
        | FeedError::EmptyCatalog { .. }
        | FeedError::InvalidFeedUrl { .. } => false,
    }
}

/// Executes `operation`, retrying retriable errors with exponential backoff.
///
/// The wait before the n-th retry is `backoff_base_secs * 2^(n-1)` seconds.
/// With `max_retries = 2` the operation runs at most 3 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, FeedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FeedError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient feed error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
