//! Shopping cart module.
//!
//! Contains the line item types, the cart map, the persisted store and its
//! persistence adapters.

mod cart;
mod line;
mod persistence;
mod store;

pub use cart::Cart;
pub use line::{clamp_quantity, LineCandidate, LineItem, MAX_QUANTITY_PER_ITEM};
#[cfg(feature = "storage")]
pub use persistence::KvPersistence;
pub use persistence::{
    decode_slot, encode_slot, CartPersistence, MemoryPersistence, CART_STORAGE_KEY,
};
pub use store::CartStore;
