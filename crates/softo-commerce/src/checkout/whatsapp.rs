//! WhatsApp checkout link builder.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, LineItem};
use crate::error::CommerceError;
use crate::money::Money;

/// Base URL of WhatsApp click-to-chat links.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Static checkout configuration: who receives the order and how the
/// message reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Shop phone number in E.164 form.
    #[serde(default = "default_phone")]
    pub phone: String,
    /// First line of the order message.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Label of the final total line.
    #[serde(default = "default_total_label")]
    pub total_label: String,
    /// Whole message sent when the cart is empty.
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
    /// Prefix printed before amounts.
    #[serde(default)]
    pub currency_symbol: String,
}

fn default_phone() -> String {
    "+905015954826".to_string()
}

fn default_greeting() -> String {
    "مرحبا SoftoDev، أريد تأكيد هذا الطلب:".to_string()
}

fn default_total_label() -> String {
    "الإجمالي".to_string()
}

fn default_empty_message() -> String {
    "مرحبا SoftoDev، أريد طلب.".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            phone: default_phone(),
            greeting: default_greeting(),
            total_label: default_total_label(),
            empty_message: default_empty_message(),
            currency_symbol: String::new(),
        }
    }
}

impl CheckoutConfig {
    /// Phone number reduced to its digits, as wa.me expects.
    pub fn phone_digits(&self) -> String {
        self.phone.chars().filter(char::is_ascii_digit).collect()
    }

    /// Check that the phone number has digits.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.phone_digits().is_empty() {
            return Err(CommerceError::InvalidPhone(self.phone.clone()));
        }
        Ok(())
    }

    /// Message and link for a cart.
    pub fn link_for(&self, cart: &Cart) -> String {
        let items: Vec<&LineItem> = cart.items().collect();
        build_link(self, &items, cart.total())
    }
}

/// Build the order message for `items` and their `total`.
///
/// ```text
/// <greeting>
///
/// 1) <name> ×<qty> — <symbol><line total>
/// ...
///
/// <total label>: <symbol><total>
/// ```
///
/// Amounts are rounded to whole units. With no items the configured
/// empty-cart message is returned instead.
pub fn build_message(config: &CheckoutConfig, items: &[&LineItem], total: Money) -> String {
    if items.is_empty() {
        return config.empty_message.clone();
    }

    let symbol = &config.currency_symbol;
    let mut lines = Vec::with_capacity(items.len() + 4);
    lines.push(config.greeting.clone());
    lines.push(String::new());
    for (i, item) in items.iter().enumerate() {
        lines.push(format!(
            "{}) {} ×{} — {}{}",
            i + 1,
            item.name,
            item.quantity,
            symbol,
            item.line_total().display_whole()
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "{}: {}{}",
        config.total_label,
        symbol,
        total.display_whole()
    ));
    lines.join("\n")
}

/// Build the wa.me link carrying the order message.
pub fn build_link(config: &CheckoutConfig, items: &[&LineItem], total: Money) -> String {
    let message = build_message(config, items, total);
    format!(
        "{}{}?text={}",
        WHATSAPP_BASE_URL,
        config.phone_digits(),
        encode_component(&message)
    )
}

/// Percent-encode text for a query string value the way
/// `encodeURIComponent` does.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}
