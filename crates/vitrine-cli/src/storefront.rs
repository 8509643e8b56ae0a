//! One shopper session: the live catalog plus a cart.
//!
//! This is the surface a UI drives. The CLI is just one such driver.

use std::sync::Arc;

use vitrine_core::{Product, StoreConfig};
use vitrine_feed::{CatalogSource, RefreshOutcome};
use vitrine_order::{
    calculate_totals, checkout, Cart, CartId, CheckoutError, OrderFormData, OrderFormatter,
    OrderRequest, OrderTotals, PricingRules,
};

/// Picks the catalog served before the feed answers.
///
/// `VITRINE_FALLBACK_CATALOG` wins when set; otherwise the bundled list.
///
/// # Errors
///
/// Fails when the configured file cannot be read or parsed.
pub fn resolve_fallback(config: &StoreConfig) -> anyhow::Result<Vec<Product>> {
    match &config.fallback_catalog_path {
        Some(path) => {
            let products = vitrine_core::load_fallback_catalog(path)?;
            tracing::debug!(
                path = %path.display(),
                count = products.len(),
                "using fallback catalog file"
            );
            Ok(products)
        }
        None => Ok(vitrine_core::bundled_catalog()),
    }
}

/// A catalog source, a cart and the store's pricing and order settings.
pub struct Storefront {
    source: CatalogSource,
    cart: Cart,
    pricing: PricingRules,
    formatter: OrderFormatter,
}

impl Storefront {
    #[must_use]
    pub fn new(source: CatalogSource, pricing: PricingRules, formatter: OrderFormatter) -> Self {
        Self {
            source,
            cart: Cart::new(),
            pricing,
            formatter,
        }
    }

    /// # Errors
    ///
    /// Fails when the fallback catalog file cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &StoreConfig) -> anyhow::Result<Self> {
        let fallback = resolve_fallback(config)?;
        let source = CatalogSource::from_config(config, fallback)
            .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;
        Ok(Self::new(
            source,
            PricingRules::from_config(config),
            OrderFormatter::from_config(config),
        ))
    }

    /// Reloads the catalog from the feed. Failures keep the current catalog.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.source.refresh().await
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<[Product]> {
        self.source.catalog()
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds `quantity` of the catalog product `product_id`, raised to the
    /// product's minimum if lower.
    ///
    /// # Errors
    ///
    /// Fails when the product is unknown or unavailable.
    pub fn add_to_cart(&mut self, product_id: &str, quantity: u32) -> anyhow::Result<CartId> {
        let product = self
            .source
            .product(product_id)
            .ok_or_else(|| anyhow::anyhow!("product '{product_id}' is not in the catalog"))?;
        self.cart
            .add_product(&product, quantity)
            .ok_or_else(|| anyhow::anyhow!("product '{product_id}' is unavailable"))
    }

    pub fn update_quantity(&mut self, cart_id: &CartId, delta: i64) {
        self.cart.update_quantity(cart_id, delta);
    }

    pub fn remove_from_cart(&mut self, cart_id: &CartId) {
        self.cart.remove(cart_id);
    }

    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        calculate_totals(self.cart.items(), &self.pricing)
    }

    /// Renders the order without gating or validation. `contact` must
    /// already be valid.
    #[must_use]
    pub fn format_order(&self, contact: &OrderFormData) -> OrderRequest {
        self.formatter
            .format(contact, self.cart.items(), &self.totals())
    }

    /// Gates and validates, then renders the order.
    ///
    /// # Errors
    ///
    /// See [`vitrine_order::checkout`].
    pub fn checkout(&self, form: &OrderFormData) -> Result<OrderRequest, CheckoutError> {
        checkout(form, &self.cart, &self.pricing, &self.formatter)
    }
}
