//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up a catalog product id with a
//! cart line key, which look alike on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Size;

/// Separator between product id and size in a line key.
pub const LINE_KEY_SEPARATOR: &str = "__";

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Catalog product identifier (a UUID string on the storefront API).
    ProductId
);
define_id!(
    /// Cart line key: `<productId>__<size>`, or the bare product id for
    /// products without a size dimension.
    LineKey
);

impl LineKey {
    /// Build the line key for a product and an optional size.
    pub fn for_product(product_id: &ProductId, size: Option<&Size>) -> Self {
        match size {
            Some(size) => Self(format!(
                "{}{}{}",
                product_id.as_str(),
                LINE_KEY_SEPARATOR,
                size.as_str()
            )),
            None => Self(product_id.as_str().to_string()),
        }
    }

    /// The product id part of the key.
    pub fn product_part(&self) -> &str {
        self.0
            .split_once(LINE_KEY_SEPARATOR)
            .map_or(self.0.as_str(), |(product, _)| product)
    }
}
