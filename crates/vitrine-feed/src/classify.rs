//! Free-text product type classification.
//!
//! The spreadsheet's type column is hand-typed, so it is matched against an
//! ordered list of keyword rules. The first rule with a keyword contained in
//! the lower-cased text wins; no match falls through to
//! [`ProductType::Pastry`].

use vitrine_core::ProductType;

/// Maps any of `keywords` (lower-case substrings) to `category`.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub category: ProductType,
    pub keywords: &'static [&'static str],
}

/// Rules in precedence order. Beverage is checked before roll, so
/// `"refri salsicha"` is a beverage.
pub const DEFAULT_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        category: ProductType::Beverage,
        keywords: &["bebida", "drink", "refrigerante", "refri"],
    },
    ClassificationRule {
        category: ProductType::Roll,
        keywords: &["enroladinho", "salsicha"],
    },
];

/// Classifies a raw type column with [`DEFAULT_RULES`].
#[must_use]
pub fn classify(raw: &str) -> ProductType {
    classify_with(DEFAULT_RULES, raw)
}

/// Classifies a raw type column against `rules`, evaluated in order.
#[must_use]
pub fn classify_with(rules: &[ClassificationRule], raw: &str) -> ProductType {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return ProductType::default();
    }

    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| text.contains(*kw)))
        .map_or_else(ProductType::default, |rule| rule.category)
}
