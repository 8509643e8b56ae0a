//! Normalization from tokenized feed rows to [`vitrine_core::Product`].
//!
//! Column positions are fixed by the spreadsheet layout:
//!
//! | col | field |
//! |-----|-------|
//! | 0 | id |
//! | 1 | name |
//! | 2 | type (free text, see [`crate::classify`]) |
//! | 3 | description |
//! | 4 | price, e.g. `R$ 2,50` or `3.00` |
//! | 5 | image URL |
//! | 6 | availability flag |
//!
//! A bad row is rejected on its own and never aborts the rest of the feed.

use std::str::FromStr;

use rust_decimal::Decimal;
use vitrine_core::{Product, MAX_UNIT_PRICE};

use crate::classify::classify;
use crate::tokenize::{parse_rows, FeedRow};

/// Rows with fewer columns than this cannot form a product.
const MIN_COLUMNS: usize = 5;

const COL_ID: usize = 0;
const COL_NAME: usize = 1;
const COL_TYPE: usize = 2;
const COL_DESCRIPTION: usize = 3;
const COL_PRICE: usize = 4;
const COL_IMAGE: usize = 5;
const COL_AVAILABLE: usize = 6;

/// Availability values (upper-cased) that mean "in stock".
const TRUTHY_AVAILABILITY: &[&str] = &["TRUE", "VERDADEIRO", "SIM", "S", "1", "YES"];

const CURRENCY_PREFIX: &str = "R$";

/// Why a feed row was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    TooFewColumns(usize),
    EmptyId,
    EmptyName,
    InvalidPrice(String),
    NegativePrice(String),
    /// Above [`MAX_UNIT_PRICE`].
    PriceOutOfRange(String),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::TooFewColumns(n) => {
                write!(f, "expected at least {MIN_COLUMNS} columns, found {n}")
            }
            RejectReason::EmptyId => write!(f, "id is empty"),
            RejectReason::EmptyName => write!(f, "name is empty"),
            RejectReason::InvalidPrice(raw) => write!(f, "price \"{raw}\" is not a number"),
            RejectReason::NegativePrice(raw) => write!(f, "price \"{raw}\" is negative"),
            RejectReason::PriceOutOfRange(raw) => {
                write!(f, "price \"{raw}\" is above the maximum of {MAX_UNIT_PRICE}")
            }
        }
    }
}

/// A feed row that did not become a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    pub line: usize,
    pub reason: RejectReason,
}

/// Result of normalizing a whole feed.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    /// Accepted products in feed order. Duplicate ids are kept as-is.
    pub products: Vec<Product>,
    pub rejected: Vec<RowRejection>,
}

/// Tokenizes `text`, skips the header row, and normalizes every data row.
///
/// `placeholder_image` is used for rows whose image column is blank.
#[must_use]
pub fn normalize_feed(text: &str, placeholder_image: &str) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for row in parse_rows(text).iter().skip(1) {
        match normalize_row(row, placeholder_image) {
            Ok(product) => report.products.push(product),
            Err(rejection) => {
                tracing::debug!(
                    line = rejection.line,
                    reason = %rejection.reason,
                    "skipping feed row"
                );
                report.rejected.push(rejection);
            }
        }
    }

    report
}

/// Normalizes one data row into a [`Product`].
///
/// # Errors
///
/// Returns a [`RowRejection`] when the row has too few columns, an empty id
/// or name, or a price that does not parse to a number between zero and
/// [`MAX_UNIT_PRICE`].
pub fn normalize_row(row: &FeedRow, placeholder_image: &str) -> Result<Product, RowRejection> {
    let reject = |reason| RowRejection {
        line: row.line,
        reason,
    };

    let cols = &row.columns;
    if cols.len() < MIN_COLUMNS {
        return Err(reject(RejectReason::TooFewColumns(cols.len())));
    }
    let column = move |idx: usize| cols.get(idx).map_or("", String::as_str);

    let id = column(COL_ID);
    if id.is_empty() {
        return Err(reject(RejectReason::EmptyId));
    }
    let name = column(COL_NAME);
    if name.is_empty() {
        return Err(reject(RejectReason::EmptyName));
    }

    let raw_price = column(COL_PRICE);
    let unit_price = parse_price(raw_price)
        .ok_or_else(|| reject(RejectReason::InvalidPrice(raw_price.to_owned())))?;
    if unit_price.is_sign_negative() && !unit_price.is_zero() {
        return Err(reject(RejectReason::NegativePrice(raw_price.to_owned())));
    }
    if unit_price > MAX_UNIT_PRICE {
        return Err(reject(RejectReason::PriceOutOfRange(raw_price.to_owned())));
    }

    let description = Some(column(COL_DESCRIPTION))
        .filter(|d| !d.is_empty())
        .map(str::to_owned);

    let image = match column(COL_IMAGE) {
        "" => placeholder_image.to_owned(),
        url => url.to_owned(),
    };

    Ok(Product {
        id: id.to_owned(),
        name: name.to_owned(),
        product_type: classify(column(COL_TYPE)),
        description,
        image,
        unit_price,
        // The feed carries no minimum-quantity column.
        min_quantity: 1,
        available: parse_availability(column(COL_AVAILABLE)),
    })
}

/// Parses a price such as `"R$ 2,50"`, `"3.00"` or `"R$3"`.
///
/// The currency prefix and all whitespace are removed, then the first decimal
/// comma becomes a point. Returns `None` if what remains is not a decimal.
#[must_use]
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let stripped: String = raw
        .replacen(CURRENCY_PREFIX, "", 1)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let normalized = stripped.replacen(',', ".", 1);
    Decimal::from_str(&normalized).ok()
}

/// Interprets the availability column. Blank means available.
#[must_use]
pub fn parse_availability(raw: &str) -> bool {
    let value = raw.trim().to_uppercase();
    value.is_empty() || TRUTHY_AVAILABILITY.contains(&value.as_str())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
