//! Category selection with superseded-fetch discard.
//!
//! Switching category starts a new product fetch while an older one may still
//! be in flight. Each selection takes a ticket from a monotonically increasing
//! generation counter; a response whose ticket is no longer current is
//! dropped instead of being shown.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use softo_commerce::catalog::{sort_images_first, Category, Product, ProductFilter};

use crate::FetchError;

/// Where categories and products come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All categories, in display order.
    async fn categories(&self) -> Result<Vec<Category>, FetchError>;

    /// Products matching `filter`.
    async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, FetchError>;
}

/// Proof that a selection was started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
}

impl SelectionTicket {
    /// Generation this ticket was issued at.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Monotonic selection generation counter.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    generation: AtomicU64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection, superseding every earlier ticket.
    pub fn begin(&self) -> SelectionTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        SelectionTicket { generation }
    }

    /// Whether no selection has started since `ticket` was issued.
    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Latest generation handed out; 0 before the first selection.
    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Browses the catalog one category at a time, last selection wins.
pub struct CatalogBrowser<S: CatalogSource> {
    source: S,
    tracker: SelectionTracker,
}

impl<S: CatalogSource> CatalogBrowser<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            tracker: SelectionTracker::new(),
        }
    }

    /// Load categories. The first one is the initial selection.
    pub async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        self.source.categories().await
    }

    /// Select a category by slug and fetch its products.
    ///
    /// Returns `None` when another selection started before this fetch
    /// finished; the caller should keep showing the newer selection.
    pub async fn select_category(
        &self,
        slug: &str,
    ) -> Option<Result<Vec<Product>, FetchError>> {
        self.select(ProductFilter::category(slug)).await
    }

    /// Select with an arbitrary filter. Products with an image are listed
    /// first, otherwise in API order.
    pub async fn select(&self, filter: ProductFilter) -> Option<Result<Vec<Product>, FetchError>> {
        let ticket = self.tracker.begin();
        let result = self.source.products(&filter).await;

        if !self.tracker.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                current = self.tracker.current(),
                category = filter.category.as_deref().unwrap_or(""),
                "discarding superseded product listing"
            );
            return None;
        }

        Some(result.map(|mut products| {
            sort_images_first(&mut products);
            products
        }))
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_supersedes_older_tickets() {
        let tracker = SelectionTracker::new();
        assert_eq!(tracker.current(), 0);

        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second.generation() > first.generation());
    }
}
