//! The live catalog: fetched from the feed, falling back to a static list.
//!
//! Refreshes are fire-and-forget from the shopper's point of view, so two
//! can be in flight at once. Every refresh takes a [`RefreshTicket`]; only
//! the completion holding the most recently issued ticket is applied, and
//! earlier completions are discarded as [`RefreshOutcome::Stale`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use vitrine_core::{Product, StoreConfig};

use crate::client::CatalogClient;
use crate::error::FeedError;
use crate::normalize::normalize_feed;

/// Identifies one refresh request, in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// What a completed refresh did to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The feed was read and replaced the catalog.
    Updated { count: usize },
    /// The feed failed or was empty; the previous catalog is still served.
    KeptPrevious { reason: String },
    /// A newer refresh was issued while this one was in flight.
    Stale,
}

#[derive(Debug)]
struct CatalogState {
    products: Arc<[Product]>,
    /// `None` while the fallback catalog is being served.
    last_updated: Option<DateTime<Utc>>,
    in_flight: usize,
}

/// Owns the current catalog and refreshes it from the feed.
pub struct CatalogSource {
    client: CatalogClient,
    feed_url: String,
    placeholder_image: String,
    state: Mutex<CatalogState>,
    issued: AtomicU64,
}

impl CatalogSource {
    /// Creates a source serving `fallback` until the first successful refresh.
    #[must_use]
    pub fn new(
        client: CatalogClient,
        feed_url: impl Into<String>,
        placeholder_image: impl Into<String>,
        fallback: Vec<Product>,
    ) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
            placeholder_image: placeholder_image.into(),
            state: Mutex::new(CatalogState {
                products: fallback.into(),
                last_updated: None,
                in_flight: 0,
            }),
            issued: AtomicU64::new(0),
        }
    }

    /// Builds the HTTP client and source from store configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &StoreConfig, fallback: Vec<Product>) -> Result<Self, FeedError> {
        let client = CatalogClient::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )?;
        Ok(Self::new(
            client,
            config.feed_url.clone(),
            config.placeholder_image.clone(),
            fallback,
        ))
    }

    /// Snapshot of the current catalog. Replaced wholesale on refresh, never
    /// mutated in place.
    #[must_use]
    pub fn catalog(&self) -> Arc<[Product]> {
        Arc::clone(&self.lock().products)
    }

    /// Looks up a product by id in the current catalog. With duplicate ids
    /// in the feed, the last row wins.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<Product> {
        self.lock().products.iter().rev().find(|p| p.id == id).cloned()
    }

    /// When the feed last replaced the catalog; `None` if still on fallback.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.lock().last_updated
    }

    /// `true` while at least one refresh is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().in_flight > 0
    }

    /// Fetches the feed and applies it if this is still the latest refresh.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.begin_refresh();
        let result = self.load_feed().await;
        self.complete_refresh(ticket, result)
    }

    /// Issues a ticket for a new refresh, superseding any in flight.
    pub fn begin_refresh(&self) -> RefreshTicket {
        self.lock().in_flight += 1;
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Applies the result of the refresh holding `ticket`.
    ///
    /// Stale tickets are discarded whatever their result. A failure or an
    /// empty product list keeps the previous catalog.
    pub fn complete_refresh(
        &self,
        ticket: RefreshTicket,
        result: Result<Vec<Product>, FeedError>,
    ) -> RefreshOutcome {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);

        let latest = self.issued.load(Ordering::SeqCst);
        if ticket.0 != latest {
            tracing::debug!(
                ticket = ticket.0,
                latest,
                "discarding stale catalog refresh"
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(products) if !products.is_empty() => {
                let count = products.len();
                state.products = products.into();
                state.last_updated = Some(Utc::now());
                tracing::info!(count, url = %self.feed_url, "catalog refreshed from feed");
                RefreshOutcome::Updated { count }
            }
            Ok(_) => {
                let err = FeedError::EmptyCatalog {
                    url: self.feed_url.clone(),
                };
                tracing::warn!(error = %err, kept = state.products.len(), "keeping previous catalog");
                RefreshOutcome::KeptPrevious {
                    reason: err.to_string(),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, kept = state.products.len(), "keeping previous catalog");
                RefreshOutcome::KeptPrevious {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Fetches and normalizes the feed.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogClient::fetch_feed`] errors, and returns
    /// [`FeedError::EmptyCatalog`] when no row survives normalization.
    pub async fn load_feed(&self) -> Result<Vec<Product>, FeedError> {
        let text = self.client.fetch_feed(&self.feed_url).await?;
        let report = normalize_feed(&text, &self.placeholder_image);
        if !report.rejected.is_empty() {
            tracing::info!(
                accepted = report.products.len(),
                rejected = report.rejected.len(),
                "feed rows rejected during normalization"
            );
        }
        if report.products.is_empty() {
            return Err(FeedError::EmptyCatalog {
                url: self.feed_url.clone(),
            });
        }
        Ok(report.products)
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
