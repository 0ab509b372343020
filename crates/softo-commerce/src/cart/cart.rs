//! The cart map and its persisted layout.

use std::collections::BTreeMap;

use crate::cart::{clamp_quantity, LineCandidate, LineItem, MAX_QUANTITY_PER_ITEM};
use crate::catalog::Size;
use crate::ids::{LineKey, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Deserializer, Serialize};

/// A shopping cart: line items keyed by [`LineKey`].
///
/// Every line has a quantity of at least 1. Iteration follows key order,
/// which keeps listings and checkout messages deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    lines: BTreeMap<LineKey, LineItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: BTreeMap::new(),
            currency,
        }
    }

    /// Add a candidate to the cart.
    ///
    /// `quantity` is floored and clamped to at least 1. When the key is
    /// already present its quantity grows by that amount and every other
    /// field is replaced by the candidate's snapshot. The snapshot price is
    /// held in the cart's currency: a price labelled with another currency
    /// keeps its amount and takes the cart's label.
    pub fn add(&mut self, mut candidate: LineCandidate, quantity: f64) -> &LineItem {
        if candidate.unit_price.currency != self.currency {
            tracing::debug!(
                key = %candidate.key,
                from = %candidate.unit_price.currency,
                to = %self.currency,
                "pricing cart line in cart currency"
            );
            candidate.unit_price = candidate.unit_price.in_currency(self.currency);
        }
        let added = clamp_quantity(quantity);
        let current = self
            .lines
            .get(&candidate.key)
            .map_or(0, |line| line.quantity);
        let quantity = current.saturating_add(added).min(MAX_QUANTITY_PER_ITEM);

        let key = candidate.key.clone();
        let line = LineItem::from_candidate(candidate, quantity);
        self.lines.insert(key.clone(), line);
        &self.lines[&key]
    }

    /// Increase a line's quantity by one. Returns whether the cart changed.
    pub fn increment(&mut self, key: &str) -> bool {
        match self.lines.get_mut(key) {
            Some(line) if line.quantity < MAX_QUANTITY_PER_ITEM => {
                line.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Decrease a line's quantity by one, removing the line when it would
    /// reach zero. Returns whether the cart changed.
    pub fn decrement(&mut self, key: &str) -> bool {
        let Some(line) = self.lines.get_mut(key) else {
            return false;
        };
        if line.quantity <= 1 {
            self.lines.remove(key);
        } else {
            line.quantity -= 1;
        }
        true
    }

    /// Remove a line. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.lines.remove(key).is_some()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get a line by key.
    pub fn get(&self, key: &str) -> Option<&LineItem> {
        self.lines.get(key)
    }

    /// Lines in key order.
    pub fn items(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.values()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities.
    pub fn count(&self) -> i64 {
        self.lines.values().map(|l| l.quantity).sum()
    }

    /// Sum of unit price times quantity.
    pub fn total(&self) -> Money {
        self.lines
            .values()
            .fold(Money::zero(self.currency), |acc, line| {
                acc.saturating_add(&line.line_total())
            })
    }

    /// Currency the cart is priced in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Encode the cart in its persisted layout: one JSON object keyed by
    /// line key, each value `{id, name, price, image?, qty, size?}`.
    pub fn to_persisted(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .lines
            .iter()
            .filter_map(|(key, line)| {
                serde_json::to_value(StoredLine::from(line))
                    .ok()
                    .map(|value| (key.to_string(), value))
            })
            .collect();
        serde_json::Value::Object(map)
    }

    /// Decode a persisted cart.
    ///
    /// Returns `None` when the value is not a JSON object. Entries that do not
    /// decode, or whose quantity is below 1, are dropped.
    pub fn from_persisted(value: serde_json::Value, currency: Currency) -> Option<Self> {
        let serde_json::Value::Object(map) = value else {
            return None;
        };

        let mut cart = Self::new(currency);
        for (key, entry) in map {
            match serde_json::from_value::<StoredLine>(entry) {
                Ok(stored) if stored.qty >= 1 => {
                    let line = stored.into_line(LineKey::new(key), currency);
                    cart.lines.insert(line.key.clone(), line);
                }
                Ok(_) => {
                    tracing::debug!(key = %key, "dropping persisted cart line with non-positive quantity");
                }
                Err(e) => {
                    tracing::debug!(key = %key, error = %e, "dropping malformed persisted cart line");
                }
            }
        }
        Some(cart)
    }
}

/// Persisted form of a line.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLine {
    id: String,
    name: String,
    price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(deserialize_with = "lenient_quantity")]
    qty: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<String>,
}

impl StoredLine {
    fn into_line(self, key: LineKey, currency: Currency) -> LineItem {
        LineItem {
            product_id: ProductId::new(key.product_part()),
            key,
            name: self.name,
            unit_price: Money::from_decimal(self.price.max(0.0), currency),
            image: self.image,
            size: self.size.map(Size::new),
            quantity: self.qty,
        }
    }
}

impl From<&LineItem> for StoredLine {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.key.to_string(),
            name: line.name.clone(),
            price: line.unit_price.to_decimal(),
            image: line.image.clone(),
            qty: line.quantity,
            size: line.size.as_ref().map(|s| s.to_string()),
        }
    }
}

/// Accept any JSON number as a quantity, flooring fractions. Values that are
/// not finite or below 1 come back as 0 so the caller can drop the line.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_finite() && raw >= 1.0 {
        Ok(raw.floor().min(MAX_QUANTITY_PER_ITEM as f64) as i64)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(key: &str, name: &str, price: i64) -> LineCandidate {
        LineCandidate::new(key, name, Money::from_major(price, Currency::IQD))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::IQD);
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_add_same_key_increases_quantity() {
        let mut cart = Cart::new(Currency::IQD);
        cart.add(candidate("p1", "A", 10), 2.0);
        cart.add(candidate("p1", "A", 10), 3.0);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 5);
    }

    #[test]
    fn test_add_replaces_snapshot() {
        let mut cart = Cart::new(Currency::IQD);
        cart.add(candidate("p1__M", "A", 10).with_image("a.jpg"), 1.0);
        cart.add(candidate("p1__M", "B", 12), 1.0);

        let line = cart.get("p1__M").unwrap();
        assert_eq!(line.name, "B");
        assert_eq!(line.unit_price, Money::from_major(12, Currency::IQD));
        assert!(line.image.is_none());
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = Cart::new(Currency::IQD);
        cart.add(candidate("p1", "A", 10), 1.0);

        assert!(cart.increment("p1"));
        assert_eq!(cart.count(), 2);
        assert!(cart.decrement("p1"));
        assert_eq!(cart.count(), 1);
        assert!(cart.decrement("p1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_missing_key_is_noop() {
        let mut cart = Cart::new(Currency::IQD);
        assert!(!cart.increment("nope"));
        assert!(!cart.decrement("nope"));
        assert!(!cart.remove("nope"));
    }

    #[test]
    fn test_quantity_saturates_at_limit() {
        let mut cart = Cart::new(Currency::IQD);
        cart.add(candidate("p1", "A", 1), MAX_QUANTITY_PER_ITEM as f64);
        cart.add(candidate("p1", "A", 1), 5.0);
        assert_eq!(cart.get("p1").unwrap().quantity, MAX_QUANTITY_PER_ITEM);
        assert!(!cart.increment("p1"));
    }

    #[test]
    fn test_foreign_currency_line_counts_toward_total() {
        let mut cart = Cart::new(Currency::IQD);
        cart.add(
            LineCandidate::new("p1", "Cap", Money::new(500, Currency::USD)),
            2.0,
        );

        let line = cart.get("p1").unwrap();
        assert_eq!(line.unit_price, Money::new(500, Currency::IQD));
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), Money::new(1000, Currency::IQD));

        let reloaded = Cart::from_persisted(cart.to_persisted(), Currency::IQD).unwrap();
        assert_eq!(reloaded, cart);
    }

    #[test]
    fn test_fractional_price_survives_reload() {
        let value = json!({"p1": {"id": "p1", "name": "Cap", "price": 12.5, "qty": 2}});
        let cart = Cart::from_persisted(value.clone(), Currency::IQD).unwrap();

        assert_eq!(cart.get("p1").unwrap().unit_price.to_decimal(), 12.5);
        assert_eq!(cart.total(), Money::from_major(25, Currency::IQD));
        assert_eq!(cart.to_persisted(), value);
    }

    #[test]
    fn test_persisted_layout() {
        let mut cart = Cart::new(Currency::IQD);
        cart.add(
            candidate("p1__M", "Tee", 15000).with_size(Size::new("M")),
            2.0,
        );

        let value = cart.to_persisted();
        assert_eq!(
            value,
            json!({"p1__M": {"id": "p1__M", "name": "Tee", "price": 15000.0, "qty": 2, "size": "M"}})
        );
    }

    #[test]
    fn test_from_persisted_rejects_non_object() {
        assert!(Cart::from_persisted(json!([1, 2]), Currency::IQD).is_none());
        assert!(Cart::from_persisted(json!("cart"), Currency::IQD).is_none());
        assert!(Cart::from_persisted(json!(null), Currency::IQD).is_none());
    }

    #[test]
    fn test_from_persisted_drops_bad_entries() {
        let value = json!({
            "ok": {"id": "ok", "name": "Fine", "price": 5, "qty": 2.7},
            "zero": {"id": "zero", "name": "Zero", "price": 5, "qty": 0},
            "broken": {"id": "broken", "price": "five", "qty": 1},
        });
        let cart = Cart::from_persisted(value, Currency::IQD).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("ok").unwrap().quantity, 2);
    }

    #[test]
    fn test_from_persisted_derives_product_id_from_key() {
        let value = json!({"abc__42": {"id": "abc__42", "name": "Runner", "price": 45000, "qty": 1, "size": "42"}});
        let cart = Cart::from_persisted(value, Currency::IQD).unwrap();
        let line = cart.get("abc__42").unwrap();
        assert_eq!(line.product_id.as_str(), "abc");
        assert_eq!(line.size, Some(Size::new("42")));
    }
}
