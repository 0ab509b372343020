//! Line items and add-to-cart candidates.

use crate::catalog::{Lang, Product, Size};
use crate::error::CommerceError;
use crate::ids::{LineKey, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity held per line item. Larger quantities saturate here.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Normalize a requested quantity: floor it, then clamp into
/// `1..=MAX_QUANTITY_PER_ITEM`. NaN maps to 1.
pub fn clamp_quantity(requested: f64) -> i64 {
    if requested.is_nan() {
        return 1;
    }
    let floored = requested.floor();
    if floored < 1.0 {
        1
    } else if floored >= MAX_QUANTITY_PER_ITEM as f64 {
        MAX_QUANTITY_PER_ITEM
    } else {
        floored as i64
    }
}

/// A line in the cart.
///
/// Name, price, image and size are snapshots taken when the line was added;
/// they are never re-fetched from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Line key, unique within the cart.
    pub key: LineKey,
    /// Catalog product this line refers to.
    pub product_id: ProductId,
    /// Display name snapshot.
    pub name: String,
    /// Unit price snapshot.
    pub unit_price: Money,
    /// Image URL snapshot.
    pub image: Option<String>,
    /// Chosen size, if the product has a size dimension.
    pub size: Option<Size>,
    /// Quantity, always at least 1.
    pub quantity: i64,
}

impl LineItem {
    /// Build a line from a candidate with an already clamped quantity.
    pub(crate) fn from_candidate(candidate: LineCandidate, quantity: i64) -> Self {
        Self {
            key: candidate.key,
            product_id: candidate.product_id,
            name: candidate.name,
            unit_price: candidate.unit_price,
            image: candidate.image,
            size: candidate.size,
            quantity,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// Everything needed to add a line to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCandidate {
    pub key: LineKey,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub image: Option<String>,
    pub size: Option<Size>,
}

impl LineCandidate {
    /// Create a candidate keyed by `key`. The product id is taken from the
    /// key, and negative prices are raised to zero.
    pub fn new(key: impl Into<LineKey>, name: impl Into<String>, unit_price: Money) -> Self {
        let key = key.into();
        let unit_price = if unit_price.is_negative() {
            Money::zero(unit_price.currency)
        } else {
            unit_price
        };
        Self {
            product_id: ProductId::new(key.product_part()),
            key,
            name: name.into(),
            unit_price,
            image: None,
            size: None,
        }
    }

    /// Set the image snapshot.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the size snapshot. Does not change the key.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Build a candidate from a catalog product.
    ///
    /// Uses `size` when given, otherwise the first size of the product's
    /// vocabulary. The key is `<productId>__<size>`.
    ///
    /// Returns [`CommerceError::InvalidSize`] if `size` is outside the
    /// vocabulary of the product's kind.
    pub fn from_product(
        product: &Product,
        size: Option<Size>,
        lang: Lang,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let size = match size {
            Some(size) if product.kind.accepts(&size) => Some(size),
            Some(size) => {
                return Err(CommerceError::InvalidSize {
                    size: size.to_string(),
                    kind: product.kind.as_str().to_string(),
                })
            }
            None => product.kind.default_size(),
        };

        Ok(Self {
            key: LineKey::for_product(&product.id, size.as_ref()),
            product_id: product.id.clone(),
            name: product.display_name(lang).to_string(),
            unit_price: product.unit_price(currency),
            image: product.image.clone().filter(|i| !i.trim().is_empty()),
            size,
        })
    }
}
