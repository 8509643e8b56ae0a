//! Order message rendering for the WhatsApp order channel.
//!
//! The message is plain text with WhatsApp `*bold*` markup. The target URI is
//! `https://wa.me/<digits>?text=<message>`, percent-encoded the way browsers'
//! `encodeURIComponent` does, so the channel receives the text unchanged.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::Decimal;
use vitrine_core::StoreConfig;

use crate::cart::CartItem;
use crate::form::OrderFormData;
use crate::money::{format_brl, parse_amount};
use crate::totals::OrderTotals;

const CHANNEL_BASE: &str = "https://wa.me/";
const SEPARATOR: &str = "--------------------------------";
const ITEM_PREFIX: &str = "- ";
const ITEM_TOTAL_MARKER: &str = " (Total: ";

/// Everything except the characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A finished order ready to hand to the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub message: String,
    pub target_uri: String,
}

/// An item line read back out of an order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOrderLine {
    pub quantity: u32,
    pub name: String,
    pub line_total: Decimal,
}

/// Renders orders for one store and destination number.
#[derive(Debug, Clone)]
pub struct OrderFormatter {
    store_name: String,
    destination: String,
}

impl OrderFormatter {
    /// `destination` is the channel number as bare digits, e.g. `"5544997394844"`.
    #[must_use]
    pub fn new(store_name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            store_name: store_name.into(),
            destination: destination.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.store_name.clone(), config.whatsapp_number.clone())
    }

    /// Builds the message and target URI. `contact` is expected to be
    /// validated already; nothing is re-checked here.
    #[must_use]
    pub fn format(
        &self,
        contact: &OrderFormData,
        items: &[CartItem],
        totals: &OrderTotals,
    ) -> OrderRequest {
        let message = self.render_message(contact, items, totals);
        let target_uri = self.target_uri(&message);
        OrderRequest {
            message,
            target_uri,
        }
    }

    fn render_message(
        &self,
        contact: &OrderFormData,
        items: &[CartItem],
        totals: &OrderTotals,
    ) -> String {
        let mut lines = vec![
            format!("*NOVO PEDIDO - {}*", self.store_name),
            SEPARATOR.to_owned(),
            "*CLIENTE*".to_owned(),
            format!("👤 Nome: {}", contact.name),
            format!("📞 Telefone: {}", contact.phone),
            String::new(),
            "*ENTREGA*".to_owned(),
            format!("📍 {}, {}", contact.street, contact.number),
            format!("🏘️ Bairro: {}", contact.neighborhood),
            String::new(),
            "*ITENS DO PEDIDO*".to_owned(),
        ];

        lines.extend(items.iter().map(|item| {
            format!(
                "{ITEM_PREFIX}{}x {}{ITEM_TOTAL_MARKER}{})",
                item.quantity,
                item.name,
                format_brl(item.line_total())
            )
        }));

        lines.extend([
            String::new(),
            format!("Subtotal: {}", format_brl(totals.subtotal)),
            format!("🛵 Taxa de Entrega: {}", format_brl(totals.delivery_fee)),
            format!("*TOTAL FINAL: {}*", format_brl(totals.total)),
            SEPARATOR.to_owned(),
            "Aguardo confirmação!".to_owned(),
        ]);

        lines.join("\n")
    }

    fn target_uri(&self, message: &str) -> String {
        let encoded = utf8_percent_encode(message, URI_COMPONENT);
        format!("{CHANNEL_BASE}{}?text={encoded}", self.destination)
    }
}

/// Extracts and decodes the `text` parameter of an order channel URI.
#[must_use]
pub fn message_from_uri(uri: &str) -> Option<String> {
    let (_, query) = uri.split_once('?')?;
    let encoded = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("text="))?;
    percent_decode_str(encoded)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

/// Reads the item lines back out of an order message.
///
/// Lines that do not look like `- <qty>x <name> (Total: R$ <amount>)` are
/// skipped.
#[must_use]
pub fn parse_order_lines(message: &str) -> Vec<ParsedOrderLine> {
    message.lines().filter_map(parse_item_line).collect()
}

fn parse_item_line(line: &str) -> Option<ParsedOrderLine> {
    let rest = line.strip_prefix(ITEM_PREFIX)?;
    let (quantity, rest) = rest.split_once("x ")?;
    let quantity = quantity.parse::<u32>().ok()?;
    let (name, total) = rest.rsplit_once(ITEM_TOTAL_MARKER)?;
    let line_total = parse_amount(total.strip_suffix(')')?)?;
    Some(ParsedOrderLine {
        quantity,
        name: name.to_owned(),
        line_total,
    })
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
