//! Product catalog module.
//!
//! Types for the categories and products served by the storefront API, the
//! localized text they carry, and the size vocabularies that decide how a
//! product becomes a cart line.

mod category;
mod filter;
mod locale;
mod product;
mod size;

pub use category::Category;
pub use filter::ProductFilter;
pub use locale::{Lang, LocalizedText};
pub use product::{sort_images_first, Product, ProductKind};
pub use size::{Size, APPAREL_SIZES, FOOTWEAR_SIZES};
