use std::path::PathBuf;

use rust_decimal::Decimal;

/// Published spreadsheet export the catalog is read from.
pub const DEFAULT_FEED_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRMuS6vkSxWKT32bWzB6KGCA5hTWkxDzwLKcjoKwVgQ7gk5HxhoCQfwJsOsWSqh2VV0v__NIagNAism/pub?gid=0&single=true&output=csv";

/// Image shown for products whose feed row has no image column.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=Sem+Imagem";

/// Order channel destination: country code + area code + local number, digits only.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "5544997394844";

pub const DEFAULT_STORE_NAME: &str = "GALVÃO PASTÉIS";

/// Runtime settings for the storefront.
///
/// [`StoreConfig::default`] carries the values the store ships with; the
/// loaders in [`crate::config`] only override them from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub feed_url: String,
    /// Flat fee added to every order.
    pub delivery_fee: Decimal,
    /// Smallest grand total (delivery fee included) that may be checked out.
    pub min_order_value: Decimal,
    pub whatsapp_number: String,
    pub store_name: String,
    pub placeholder_image: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// YAML file replacing the bundled fallback catalog, if set.
    pub fallback_catalog_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_owned(),
            delivery_fee: Decimal::new(500, 2),
            min_order_value: Decimal::new(2500, 2),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_owned(),
            store_name: DEFAULT_STORE_NAME.to_owned(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_owned(),
            log_level: "info".to_owned(),
            request_timeout_secs: 15,
            user_agent: "vitrine/0.1 (catalog-sync)".to_owned(),
            max_retries: 2,
            retry_backoff_base_secs: 1,
            fallback_catalog_path: None,
        }
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("feed_url", &self.feed_url)
            .field("delivery_fee", &self.delivery_fee)
            .field("min_order_value", &self.min_order_value)
            .field("whatsapp_number", &mask_digits(&self.whatsapp_number))
            .field("store_name", &self.store_name)
            .field("placeholder_image", &self.placeholder_image)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("fallback_catalog_path", &self.fallback_catalog_path)
            .finish()
    }
}

/// Keeps the last four digits of a phone number, masking the rest.
fn mask_digits(number: &str) -> String {
    let visible = number.len().saturating_sub(4);
    number
        .char_indices()
        .map(|(i, c)| if i < visible { '*' } else { c })
        .collect()
}
