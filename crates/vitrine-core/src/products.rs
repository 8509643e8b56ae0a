use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Highest unit price accepted from the feed or a fallback file (R$ 1.000.000,00).
///
/// Keeps `price * quantity` and cart sums far inside `Decimal`'s range for
/// any quantity a `u32` can hold.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Product category shown on the storefront.
///
/// Feed rows are classified into exactly one of these; anything the
/// classifier does not recognise lands in [`ProductType::Pastry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Pastry,
    Roll,
    Beverage,
}

impl ProductType {
    /// Display label used on product cards.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProductType::Pastry => "Mini Pastel",
            ProductType::Roll => "Enroladinho",
            ProductType::Beverage => "Bebida",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductType::Pastry => write!(f, "pastry"),
            ProductType::Roll => write!(f, "roll"),
            ProductType::Beverage => write!(f, "beverage"),
        }
    }
}

/// A catalog entry, either normalized from the published feed or taken from
/// the fallback catalog.
///
/// Catalog lists are replaced wholesale on refresh; a `Product` is never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Feed identifier, e.g. `"p-frango"`. Stable across reloads.
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub product_type: ProductType,
    #[serde(default)]
    pub description: Option<String>,
    /// Image URI. Normalization substitutes a placeholder when the feed leaves it blank.
    #[serde(default = "default_image")]
    pub image: String,
    /// Price per unit, non-negative.
    pub unit_price: Decimal,
    /// Smallest quantity a shopper may add. Always at least 1.
    #[serde(default = "default_min_quantity")]
    pub min_quantity: u32,
    #[serde(default = "default_available")]
    pub available: bool,
}

impl Product {
    /// Price for `quantity` units of this product, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn price_for(&self, quantity: u32) -> Decimal {
        self.unit_price
            .checked_mul(Decimal::from(quantity))
            .unwrap_or(Decimal::MAX)
    }
}

fn default_image() -> String {
    crate::DEFAULT_PLACEHOLDER_IMAGE.to_owned()
}

fn default_min_quantity() -> u32 {
    1
}

/// Missing availability means "available"; absence of information is not a
/// reason to hide a product.
fn default_available() -> bool {
    true
}
