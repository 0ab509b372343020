//! Storefront domain types and logic for the SoftoDev shop.
//!
//! This crate provides:
//!
//! - **Catalog**: Categories, products, product kinds and their size vocabularies
//! - **Cart**: Line items keyed by product and size, a persisted cart store
//! - **Checkout**: WhatsApp order message and deep link
//!
//! # Example
//!
//! ```rust,ignore
//! use softo_commerce::prelude::*;
//!
//! let mut store = CartStore::open(MemoryPersistence::new(Currency::IQD), Currency::IQD);
//!
//! // Add the product a shopper picked, in size M
//! let candidate = LineCandidate::from_product(&product, Some(Size::new("M")), Lang::Ar, Currency::IQD)?;
//! store.add_one(candidate);
//!
//! // Hand the order over to WhatsApp
//! let link = CheckoutConfig::default().link_for(store.cart());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        sort_images_first, Category, Lang, LocalizedText, Product, ProductFilter, ProductKind,
        Size,
    };

    // Cart
    #[cfg(feature = "storage")]
    pub use crate::cart::KvPersistence;
    pub use crate::cart::{
        Cart, CartPersistence, CartStore, LineCandidate, LineItem, MemoryPersistence,
        CART_STORAGE_KEY, MAX_QUANTITY_PER_ITEM,
    };

    // Checkout
    pub use crate::checkout::{build_link, build_message, CheckoutConfig};
}
