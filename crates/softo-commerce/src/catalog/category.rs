//! Category type for product organization.

use crate::catalog::{Lang, LocalizedText};
use serde::{Deserialize, Serialize};

/// A product category as listed by the storefront API.
///
/// The API returns categories already ordered for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Numeric category identifier.
    pub id: i64,
    /// URL-friendly slug, used to filter products.
    pub slug: String,
    /// Display label.
    pub label: LocalizedText,
}

impl Category {
    pub fn new(id: i64, slug: impl Into<String>, label: LocalizedText) -> Self {
        Self {
            id,
            slug: slug.into(),
            label,
        }
    }

    /// Label in the given language.
    pub fn name(&self, lang: Lang) -> &str {
        self.label.get(lang)
    }

    /// Find a category by slug.
    pub fn find<'a>(categories: &'a [Category], slug: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.slug == slug)
    }
}
