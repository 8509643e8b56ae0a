//! Currency display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Renders `amount` as `R$ 16,50`: two decimal places, half away from zero,
/// decimal comma, no thousands separator.
#[must_use]
pub fn format_brl(amount: Decimal) -> String {
    format!("R$ {}", format_amount(amount))
}

/// Renders `amount` as `16,50`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}").replace('.', ",")
}

/// Parses an amount rendered by [`format_amount`] (with or without `R$`).
#[must_use]
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let digits = text.trim().trim_start_matches("R$").trim().replace(',', ".");
    digits.parse::<Decimal>().ok()
}
