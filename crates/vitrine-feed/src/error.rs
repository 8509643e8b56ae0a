use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("feed body from {url} is {bytes} bytes, limit is {limit}")]
    FeedTooLarge {
        url: String,
        bytes: usize,
        limit: usize,
    },

    #[error("feed at {url} produced no valid products")]
    EmptyCatalog { url: String },

    #[error("invalid feed URL \"{url}\": {reason}")]
    InvalidFeedUrl { url: String, reason: String },
}
