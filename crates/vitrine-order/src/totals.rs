//! Order totals and the minimum-order gate.
//!
//! Amounts are kept unrounded here; rounding to cents happens only when they
//! are rendered (see [`crate::money`]). Sums saturate at [`Decimal::MAX`]
//! rather than overflow.

use rust_decimal::Decimal;
use serde::Serialize;
use vitrine_core::StoreConfig;

use crate::cart::CartItem;
use crate::money::format_brl;

/// Fee and threshold the totals are computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRules {
    pub delivery_fee: Decimal,
    /// Compared against the grand total, delivery fee included.
    pub min_order_value: Decimal,
}

impl PricingRules {
    #[must_use]
    pub fn new(delivery_fee: Decimal, min_order_value: Decimal) -> Self {
        Self {
            delivery_fee,
            min_order_value,
        }
    }

    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.delivery_fee, config.min_order_value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub min_order_value: Decimal,
    pub minimum_met: bool,
    pub item_count: u64,
}

/// Whether the cart can proceed to checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStatus {
    EmptyCart,
    /// `shortfall` more is needed to reach `minimum`.
    BelowMinimum { minimum: Decimal, shortfall: Decimal },
    Ready,
}

impl CheckoutStatus {
    /// Message shown next to the disabled checkout action, if any.
    #[must_use]
    pub fn blocked_message(&self) -> Option<String> {
        match self {
            CheckoutStatus::Ready => None,
            CheckoutStatus::EmptyCart => Some("Seu carrinho está vazio".to_owned()),
            CheckoutStatus::BelowMinimum { minimum, .. } => Some(format!(
                "Valor mínimo para finalizar o pedido {} (com taxa)",
                format_brl(*minimum)
            )),
        }
    }
}

/// Computes totals for `items` under `pricing`.
#[must_use]
pub fn calculate_totals(items: &[CartItem], pricing: &PricingRules) -> OrderTotals {
    let subtotal = items
        .iter()
        .map(CartItem::line_total)
        .fold(Decimal::ZERO, saturating_add);
    let item_count = items.iter().map(|line| u64::from(line.quantity)).sum();
    let total = saturating_add(subtotal, pricing.delivery_fee);

    OrderTotals {
        subtotal,
        delivery_fee: pricing.delivery_fee,
        total,
        min_order_value: pricing.min_order_value,
        minimum_met: total >= pricing.min_order_value,
        item_count,
    }
}

fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

impl OrderTotals {
    /// Amount still missing to reach the minimum; zero once it is met.
    #[must_use]
    pub fn shortfall(&self) -> Decimal {
        (self.min_order_value - self.total).max(Decimal::ZERO)
    }

    #[must_use]
    pub fn checkout_status(&self) -> CheckoutStatus {
        if self.item_count == 0 {
            CheckoutStatus::EmptyCart
        } else if !self.minimum_met {
            CheckoutStatus::BelowMinimum {
                minimum: self.min_order_value,
                shortfall: self.shortfall(),
            }
        } else {
            CheckoutStatus::Ready
        }
    }
}

#[cfg(test)]
mod tests {
    use vitrine_core::{Product, ProductType, MAX_UNIT_PRICE};

    use super::*;
    use crate::cart::{Cart, NewCartItem};

    fn product(id: &str, price: Decimal) -> Product {
        Product {
            id: id.to_owned(),
            name: id.to_owned(),
            product_type: ProductType::Pastry,
            description: None,
            image: String::new(),
            unit_price: price,
            min_quantity: 1,
            available: true,
        }
    }

    fn pricing() -> PricingRules {
        PricingRules::new(Decimal::new(500, 2), Decimal::new(2500, 2))
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(NewCartItem::from_product(&product("pastel", Decimal::new(85, 2)), 10));
        cart.add(NewCartItem::from_product(&product("guarana", Decimal::new(800, 2)), 1));
        cart
    }

    #[test]
    fn totals_for_two_lines_below_minimum() {
        let totals = calculate_totals(sample_cart().items(), &pricing());
        assert_eq!(totals.subtotal, Decimal::new(1650, 2));
        assert_eq!(totals.total, Decimal::new(2150, 2));
        assert_eq!(totals.delivery_fee, Decimal::new(500, 2));
        assert_eq!(totals.item_count, 11);
        assert!(!totals.minimum_met);
        assert_eq!(totals.shortfall(), Decimal::new(350, 2));
    }

    #[test]
    fn delivery_fee_counts_toward_minimum() {
        let mut cart = Cart::new();
        cart.add(NewCartItem::from_product(&product("combo", Decimal::new(20, 0)), 1));
        let totals = calculate_totals(cart.items(), &pricing());
        assert_eq!(totals.total, Decimal::new(25, 0));
        assert!(totals.minimum_met);
        assert_eq!(totals.checkout_status(), CheckoutStatus::Ready);
        assert_eq!(totals.shortfall(), Decimal::ZERO);
    }

    #[test]
    fn empty_cart_totals() {
        let totals = calculate_totals(&[], &pricing());
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(5, 0));
        assert_eq!(totals.item_count, 0);
        assert_eq!(totals.checkout_status(), CheckoutStatus::EmptyCart);
    }

    #[test]
    fn below_minimum_status_carries_shortfall_and_message() {
        let totals = calculate_totals(sample_cart().items(), &pricing());
        let status = totals.checkout_status();
        assert_eq!(
            status,
            CheckoutStatus::BelowMinimum {
                minimum: Decimal::new(25, 0),
                shortfall: Decimal::new(350, 2),
            }
        );
        assert_eq!(
            status.blocked_message().as_deref(),
            Some("Valor mínimo para finalizar o pedido R$ 25,00 (com taxa)")
        );
    }

    #[test]
    fn thresholds_vary_per_rules() {
        let lenient = PricingRules::new(Decimal::ZERO, Decimal::new(10, 0));
        let totals = calculate_totals(sample_cart().items(), &lenient);
        assert_eq!(totals.total, Decimal::new(1650, 2));
        assert!(totals.minimum_met);
    }

    #[test]
    fn repeated_small_amounts_do_not_drift() {
        let mut cart = Cart::new();
        cart.add(NewCartItem::from_product(&product("x", Decimal::new(1, 1)), 3));
        let totals = calculate_totals(cart.items(), &PricingRules::new(Decimal::ZERO, Decimal::ZERO));
        assert_eq!(totals.subtotal, Decimal::new(3, 1));
    }

    #[test]
    fn max_quantity_at_max_unit_price_stays_exact() {
        let mut cart = Cart::new();
        let id = cart.add(NewCartItem::from_product(&product("caro", MAX_UNIT_PRICE), 1));
        cart.update_quantity(&id, i64::MAX);
        let totals = calculate_totals(cart.items(), &pricing());
        let expected = MAX_UNIT_PRICE * Decimal::from(u32::MAX);
        assert_eq!(totals.subtotal, expected);
        assert_eq!(totals.total, expected + Decimal::new(5, 0));
        assert_eq!(totals.item_count, u64::from(u32::MAX));
        assert!(totals.minimum_met);
    }

    #[test]
    fn overflowing_lines_saturate_instead_of_panicking() {
        let mut cart = Cart::new();
        cart.add(NewCartItem::from_product(&product("a", Decimal::MAX), 1));
        cart.add(NewCartItem::from_product(&product("b", Decimal::MAX), 3));
        let totals = calculate_totals(cart.items(), &pricing());
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
        assert_eq!(totals.checkout_status(), CheckoutStatus::Ready);
        assert_eq!(totals.shortfall(), Decimal::ZERO);
    }

    #[test]
    fn delivery_fee_on_saturated_subtotal_does_not_overflow() {
        let mut cart = Cart::new();
        cart.add(NewCartItem::from_product(&product("a", Decimal::MAX), 1));
        let totals = calculate_totals(
            cart.items(),
            &PricingRules::new(Decimal::MAX, Decimal::ZERO),
        );
        assert_eq!(totals.total, Decimal::MAX);
    }

    #[test]
    fn rules_from_config() {
        let rules = PricingRules::from_config(&StoreConfig::default());
        assert_eq!(rules, pricing());
    }
}
