//! Catalog ingestion: tokenizing the published spreadsheet export,
//! normalizing rows into [`vitrine_core::Product`], and keeping the
//! current catalog fresh.

pub mod classify;
pub mod client;
pub mod error;
pub mod normalize;
mod retry;
pub mod source;
pub mod tokenize;

pub use classify::{classify, ClassificationRule, DEFAULT_RULES};
pub use client::CatalogClient;
pub use error::FeedError;
pub use normalize::{normalize_feed, normalize_row, NormalizeReport, RejectReason, RowRejection};
pub use source::{CatalogSource, RefreshOutcome, RefreshTicket};
pub use tokenize::{parse_rows, FeedRow, MAX_COLUMNS, MAX_ROWS};
