//! Feed URL construction.

use crate::error::FeedError;

/// Query parameter carrying the cache-busting timestamp.
const CACHE_BUST_PARAM: &str = "t";

/// Appends `t=<timestamp_millis>` to `feed_url`, keeping its existing query.
///
/// Given `"https://docs.google.com/.../pub?output=csv"` and `1700000000000`,
/// returns `"https://docs.google.com/.../pub?output=csv&t=1700000000000"`.
///
/// # Errors
///
/// Returns [`FeedError::InvalidFeedUrl`] if `feed_url` is not an absolute
/// http(s) URL.
pub fn cache_busted_url(feed_url: &str, timestamp_millis: i64) -> Result<String, FeedError> {
    let mut url = reqwest::Url::parse(feed_url).map_err(|e| FeedError::InvalidFeedUrl {
        url: feed_url.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(FeedError::InvalidFeedUrl {
            url: feed_url.to_owned(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }

    url.query_pairs_mut()
        .append_pair(CACHE_BUST_PARAM, &timestamp_millis.to_string());

    Ok(url.to_string())
}
