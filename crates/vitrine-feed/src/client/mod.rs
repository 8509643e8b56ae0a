//! HTTP client for the published spreadsheet CSV export.

mod url;

use std::time::Duration;

use reqwest::Client;

use crate::error::FeedError;
use crate::retry::retry_with_backoff;

pub use url::cache_busted_url;

/// Largest feed body accepted, in bytes. A spreadsheet export of a small
/// storefront is a few kilobytes; anything near this is not our sheet.
pub const MAX_FEED_BYTES: usize = 2 * 1024 * 1024;

/// HTTP client for the catalog feed.
///
/// Non-2xx responses are typed errors. Network failures, 429 and 5xx are
/// retried with exponential backoff up to `max_retries` additional attempts.
pub struct CatalogClient {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with the given timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches the raw feed text.
    ///
    /// A `t=<unix millis>` parameter is appended so intermediate caches
    /// never serve a stale export.
    ///
    /// # Errors
    ///
    /// - [`FeedError::InvalidFeedUrl`]: `feed_url` does not parse (not retried).
    /// - [`FeedError::UnexpectedStatus`]: non-2xx status after retries.
    /// - [`FeedError::FeedTooLarge`]: body exceeds [`MAX_FEED_BYTES`] (not retried).
    /// - [`FeedError::Http`]: network or TLS failure after retries.
    pub async fn fetch_feed(&self, feed_url: &str) -> Result<String, FeedError> {
        let url = cache_busted_url(feed_url, chrono::Utc::now().timestamp_millis())?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let mut response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "text/csv,text/plain;q=0.9,*/*;q=0.8")
                    .send()
                    .await?;
                let status = response.status();

                if !status.is_success() {
                    return Err(FeedError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                if let Some(declared) = response.content_length() {
                    let declared = usize::try_from(declared).unwrap_or(usize::MAX);
                    if declared > MAX_FEED_BYTES {
                        return Err(FeedError::FeedTooLarge {
                            url,
                            bytes: declared,
                            limit: MAX_FEED_BYTES,
                        });
                    }
                }

                // Chunked responses carry no length, so the cap is enforced while reading.
                let mut body = Vec::new();
                while let Some(chunk) = response.chunk().await? {
                    if let Err(bytes) = append_within_limit(&mut body, &chunk, MAX_FEED_BYTES) {
                        return Err(FeedError::FeedTooLarge {
                            url,
                            bytes,
                            limit: MAX_FEED_BYTES,
                        });
                    }
                }

                Ok(String::from_utf8_lossy(&body).into_owned())
            }
        })
        .await
    }
}

/// Appends `chunk` to `body` unless that would take it past `limit`.
///
/// On overflow `body` is left untouched and the length it would have reached
/// is returned.
fn append_within_limit(body: &mut Vec<u8>, chunk: &[u8], limit: usize) -> Result<(), usize> {
    let next = body.len().saturating_add(chunk.len());
    if next > limit {
        return Err(next);
    }
    body.extend_from_slice(chunk);
    Ok(())
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
