//! Shopping cart, order totals, checkout form and order message rendering.
//!
//! Everything here is synchronous and in-memory. The cart lives for one
//! session; nothing is persisted.

pub mod cart;
pub mod checkout;
pub mod form;
pub mod message;
pub mod money;
pub mod totals;

pub use cart::{Cart, CartId, CartItem, NewCartItem};
pub use checkout::{checkout, CheckoutError};
pub use form::{format_phone, FieldError, FormErrors, FormField, OrderFormData};
pub use message::{
    message_from_uri, parse_order_lines, OrderFormatter, OrderRequest, ParsedOrderLine,
};
pub use money::{format_amount, format_brl, parse_amount};
pub use totals::{calculate_totals, CheckoutStatus, OrderTotals, PricingRules};
