//! Cart persistence adapters.
//!
//! The cart store talks to storage only through [`CartPersistence`], so the
//! slot can live in a key-value store, in memory, or anywhere else.

use std::sync::{Arc, Mutex};

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::Currency;

/// Default storage key for the persisted cart. The `_v1` suffix versions the
/// layout; a new layout gets a new key.
pub const CART_STORAGE_KEY: &str = "softodev_cart_v1";

/// Load and save a whole cart.
pub trait CartPersistence {
    /// Read the persisted cart. `Ok(None)` means there is no prior cart.
    fn load(&self) -> Result<Option<Cart>, CommerceError>;

    /// Replace the persisted cart.
    fn save(&self, cart: &Cart) -> Result<(), CommerceError>;
}

impl<P: CartPersistence + ?Sized> CartPersistence for &P {
    fn load(&self) -> Result<Option<Cart>, CommerceError> {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        (**self).save(cart)
    }
}

impl<P: CartPersistence + ?Sized> CartPersistence for Box<P> {
    fn load(&self) -> Result<Option<Cart>, CommerceError> {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        (**self).save(cart)
    }
}

/// Decode the raw bytes of a persisted slot.
///
/// Invalid JSON is an error; valid JSON that is not an object is no cart.
pub fn decode_slot(raw: &[u8], currency: Currency) -> Result<Option<Cart>, CommerceError> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    Ok(Cart::from_persisted(value, currency))
}

/// Encode a cart into the raw bytes of its persisted slot.
pub fn encode_slot(cart: &Cart) -> Result<Vec<u8>, CommerceError> {
    Ok(serde_json::to_vec(&cart.to_persisted())?)
}

/// In-memory persistence holding the raw slot bytes.
///
/// Clones share the same slot, so a second store opened on a clone sees what
/// the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
    currency: Currency,
}

impl MemoryPersistence {
    /// Create an empty slot.
    pub fn new(currency: Currency) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            currency,
        }
    }

    /// Create a slot pre-filled with raw contents.
    pub fn with_raw(raw: impl Into<Vec<u8>>, currency: Currency) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
            currency,
        }
    }

    /// Current raw contents of the slot.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl CartPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<Cart>, CommerceError> {
        let raw = self
            .slot
            .lock()
            .map_err(|e| CommerceError::Storage(e.to_string()))?
            .clone();
        match raw {
            Some(raw) => decode_slot(&raw, self.currency),
            None => Ok(None),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        let raw = encode_slot(cart)?;
        *self
            .slot
            .lock()
            .map_err(|e| CommerceError::Storage(e.to_string()))? = Some(raw);
        Ok(())
    }
}

/// Persistence backed by a `softo-cache` key-value store.
#[cfg(feature = "storage")]
pub struct KvPersistence<S: softo_cache::Store> {
    cache: softo_cache::Cache<S>,
    key: String,
    currency: Currency,
}

#[cfg(feature = "storage")]
impl<S: softo_cache::Store> KvPersistence<S> {
    /// Persist under [`CART_STORAGE_KEY`].
    pub fn new(store: S, currency: Currency) -> Self {
        Self::with_key(store, CART_STORAGE_KEY, currency)
    }

    /// Persist under a custom storage key.
    pub fn with_key(store: S, key: impl Into<String>, currency: Currency) -> Self {
        Self {
            cache: softo_cache::Cache::new(store),
            key: key.into(),
            currency,
        }
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying cache.
    pub fn cache(&self) -> &softo_cache::Cache<S> {
        &self.cache
    }
}

#[cfg(feature = "storage")]
impl<S: softo_cache::Store> CartPersistence for KvPersistence<S> {
    fn load(&self) -> Result<Option<Cart>, CommerceError> {
        match self.cache.get_raw(&self.key)? {
            Some(raw) => decode_slot(&raw, self.currency),
            None => Ok(None),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        self.cache.set(&self.key, &cart.to_persisted())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineCandidate;
    use crate::money::Money;

    #[test]
    fn test_memory_round_trip() {
        let persistence = MemoryPersistence::new(Currency::IQD);
        let mut cart = Cart::new(Currency::IQD);
        cart.add(LineCandidate::new("a", "A", Money::new(10, Currency::IQD)), 2.0);

        persistence.save(&cart).unwrap();
        assert_eq!(persistence.load().unwrap(), Some(cart));
    }

    #[test]
    fn test_empty_slot_loads_none() {
        let persistence = MemoryPersistence::new(Currency::IQD);
        assert!(persistence.load().unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let persistence = MemoryPersistence::with_raw("not-json{", Currency::IQD);
        assert!(matches!(
            persistence.load(),
            Err(CommerceError::Serialization(_))
        ));
    }

    #[test]
    fn test_non_object_json_is_no_cart() {
        let persistence = MemoryPersistence::with_raw("[1,2,3]", Currency::IQD);
        assert!(persistence.load().unwrap().is_none());
    }

    #[cfg(feature = "storage")]
    #[test]
    fn test_kv_round_trip() {
        let persistence = KvPersistence::new(softo_cache::MemoryStore::new(), Currency::IQD);
        let mut cart = Cart::new(Currency::IQD);
        cart.add(LineCandidate::new("b__M", "B", Money::new(7, Currency::IQD)), 3.0);

        persistence.save(&cart).unwrap();
        assert_eq!(persistence.key(), CART_STORAGE_KEY);
        assert_eq!(persistence.load().unwrap(), Some(cart));
    }
}
