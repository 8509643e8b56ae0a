//! The checkout step: gate on cart state, validate the form, render the order.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::Cart;
use crate::form::{FormErrors, OrderFormData};
use crate::message::{OrderFormatter, OrderRequest};
use crate::money::format_brl;
use crate::totals::{calculate_totals, CheckoutStatus, PricingRules};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("order total is below the minimum of {}: {} short", format_brl(*.minimum), format_brl(*.shortfall))]
    BelowMinimum { minimum: Decimal, shortfall: Decimal },

    #[error(transparent)]
    InvalidForm(#[from] FormErrors),
}

/// Turns a cart and checkout form into an [`OrderRequest`].
///
/// The phone is masked before validation, so raw digits are accepted. Cart
/// state is checked before the form.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`] when there is nothing to order.
/// - [`CheckoutError::BelowMinimum`] when the total with delivery is under
///   the store minimum.
/// - [`CheckoutError::InvalidForm`] listing each invalid field.
pub fn checkout(
    form: &OrderFormData,
    cart: &Cart,
    pricing: &PricingRules,
    formatter: &OrderFormatter,
) -> Result<OrderRequest, CheckoutError> {
    let totals = calculate_totals(cart.items(), pricing);

    match totals.checkout_status() {
        CheckoutStatus::EmptyCart => return Err(CheckoutError::EmptyCart),
        CheckoutStatus::BelowMinimum { minimum, shortfall } => {
            tracing::debug!(%minimum, %shortfall, "checkout refused below minimum");
            return Err(CheckoutError::BelowMinimum { minimum, shortfall });
        }
        CheckoutStatus::Ready => {}
    }

    let contact = form.normalized();
    contact.validate()?;

    let request = formatter.format(&contact, cart.items(), &totals);
    tracing::info!(
        lines = cart.line_count(),
        items = totals.item_count,
        total = %totals.total,
        "order message ready"
    );
    Ok(request)
}
