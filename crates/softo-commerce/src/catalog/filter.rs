//! Product list filter.

use crate::catalog::ProductKind;
use serde::{Deserialize, Serialize};

/// Filter for the product listing endpoint.
///
/// Each set field becomes one query parameter; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Category slug (the API also accepts a numeric category id here).
    pub category: Option<String>,
    /// Product kind.
    pub kind: Option<ProductKind>,
}

impl ProductFilter {
    /// No filtering.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter by category slug.
    pub fn category(slug: impl Into<String>) -> Self {
        Self {
            category: Some(slug.into()),
            kind: None,
        }
    }

    /// Restrict to one product kind.
    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Query parameters in the order the API documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(kind) = self.kind {
            pairs.push(("type", kind.as_str().to_string()));
        }
        pairs
    }
}
