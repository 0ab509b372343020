//! The cart store: a cart plus the persistence slot it is mirrored to.

use crate::cart::{Cart, CartPersistence, LineCandidate, LineItem};
use crate::money::{Currency, Money};

/// Single source of truth for the shopping cart within a session.
///
/// The store hydrates from its persistence adapter when opened and writes the
/// whole cart back after every mutation that changed it. Storage failures are
/// logged and swallowed: a broken slot yields an empty cart on open and a
/// dropped write on save, never an error to the caller.
///
/// Two stores sharing one slot do not merge; the last write wins.
///
/// # Example
///
/// ```
/// use softo_commerce::cart::{CartStore, LineCandidate, MemoryPersistence};
/// use softo_commerce::money::{Currency, Money};
///
/// let mut store = CartStore::open(MemoryPersistence::new(Currency::IQD), Currency::IQD);
/// store.add(LineCandidate::new("p1__M", "Tee", Money::from_major(15000, Currency::IQD)), 2.0);
/// assert_eq!(store.count(), 2);
/// assert_eq!(store.total(), Money::from_major(30000, Currency::IQD));
/// ```
pub struct CartStore<P: CartPersistence> {
    cart: Cart,
    persistence: P,
}

impl<P: CartPersistence> CartStore<P> {
    /// Open the store, hydrating from `persistence`.
    ///
    /// A missing, unreadable or malformed slot starts an empty cart.
    pub fn open(persistence: P, currency: Currency) -> Self {
        let cart = match persistence.load() {
            Ok(Some(cart)) => {
                tracing::debug!(lines = cart.len(), "hydrated cart");
                cart
            }
            Ok(None) => Cart::new(currency),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable persisted cart");
                Cart::new(currency)
            }
        };
        Self { cart, persistence }
    }

    /// Add `quantity` of a candidate (floored, at least 1). An existing line
    /// with the same key grows and takes the candidate's snapshot.
    pub fn add(&mut self, candidate: LineCandidate, quantity: f64) {
        self.cart.add(candidate, quantity);
        self.persist();
    }

    /// Add one of a candidate.
    pub fn add_one(&mut self, candidate: LineCandidate) {
        self.add(candidate, 1.0);
    }

    /// Increase a line's quantity by one. Unknown keys are ignored.
    pub fn increment(&mut self, key: &str) {
        if self.cart.increment(key) {
            self.persist();
        }
    }

    /// Decrease a line's quantity by one, removing it at zero. Unknown keys
    /// are ignored.
    pub fn decrement(&mut self, key: &str) {
        if self.cart.decrement(key) {
            self.persist();
        }
    }

    /// Remove a line. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if self.cart.remove(key) {
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Lines in key order.
    pub fn items(&self) -> Vec<&LineItem> {
        self.cart.items().collect()
    }

    /// Get a line by key.
    pub fn get(&self, key: &str) -> Option<&LineItem> {
        self.cart.get(key)
    }

    /// Sum of quantities.
    pub fn count(&self) -> i64 {
        self.cart.count()
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The persistence adapter.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.cart) {
            tracing::warn!(error = %e, "dropping cart write");
        }
    }
}
