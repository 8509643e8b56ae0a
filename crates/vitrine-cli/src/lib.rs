//! Session facade shared by the `vitrine-cli` binary and any other front end.

pub mod storefront;

pub use storefront::{resolve_fallback, Storefront};
