//! Product types.

use crate::catalog::{Lang, LocalizedText, Size, APPAREL_SIZES, FOOTWEAR_SIZES};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Product kind, carried explicitly by the catalog API.
///
/// The kind decides which size vocabulary applies to the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// Apparel, sized S/M/L/XL.
    Clothes,
    /// Footwear, sized 36 through 46.
    Shoes,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Clothes => "clothes",
            ProductKind::Shoes => "shoes",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clothes" => Some(ProductKind::Clothes),
            "shoes" => Some(ProductKind::Shoes),
            _ => None,
        }
    }

    /// Sizes offered for this kind, in display order.
    pub fn size_options(&self) -> &'static [&'static str] {
        match self {
            ProductKind::Clothes => &APPAREL_SIZES,
            ProductKind::Shoes => &FOOTWEAR_SIZES,
        }
    }

    /// The size preselected when the shopper has not picked one.
    pub fn default_size(&self) -> Option<Size> {
        self.size_options().first().map(|s| Size::new(*s))
    }

    /// Check whether a size belongs to this kind's vocabulary.
    pub fn accepts(&self, size: &Size) -> bool {
        self.size_options().contains(&size.as_str())
    }
}

/// A product as listed by the storefront API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product kind.
    #[serde(rename = "type")]
    pub kind: ProductKind,
    /// Product name.
    pub name: LocalizedText,
    /// Product description.
    #[serde(default)]
    pub description: LocalizedText,
    /// Current price as a decimal amount.
    #[serde(rename = "priceFull", alias = "price")]
    pub price: f64,
    /// Previous price, shown struck through when higher than `price`.
    #[serde(rename = "oldPrice", default)]
    pub old_price: Option<f64>,
    /// Optional badge (e.g. "New").
    #[serde(default)]
    pub badge: Option<LocalizedText>,
    /// Absolute image URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Create a product with the required fields.
    pub fn new(
        id: impl Into<ProductId>,
        kind: ProductKind,
        name: LocalizedText,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name,
            description: LocalizedText::default(),
            price,
            old_price: None,
            badge: None,
            image: None,
        }
    }

    /// Name in the given language.
    pub fn display_name(&self, lang: Lang) -> &str {
        self.name.get(lang)
    }

    /// Badge text in the given language, if the product has a non-empty badge.
    pub fn badge_text(&self, lang: Lang) -> Option<&str> {
        self.badge
            .as_ref()
            .map(|b| b.get(lang))
            .filter(|b| !b.is_empty())
    }

    /// Price as Money. Negative prices are treated as zero.
    pub fn unit_price(&self, currency: Currency) -> Money {
        Money::from_decimal(self.price.max(0.0), currency)
    }

    /// Check if the product has a usable image.
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|i| !i.trim().is_empty())
    }

    /// Check if the product is on sale (old price above current price).
    pub fn is_on_sale(&self) -> bool {
        self.old_price.is_some_and(|old| old > self.price)
    }

    /// Calculate the discount percentage if on sale.
    pub fn discount_percentage(&self) -> Option<f64> {
        self.old_price.and_then(|old| {
            if old > self.price && old > 0.0 {
                Some(((old - self.price) / old) * 100.0)
            } else {
                None
            }
        })
    }
}

/// Order products so those with an image come first.
///
/// The sort is stable: API order is kept within each group.
pub fn sort_images_first(products: &mut [Product]) {
    products.sort_by_key(|p| !p.has_image());
}
