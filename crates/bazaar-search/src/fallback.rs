//! Degraded-mode regex fallback search.
//!
//! Used only when the primary ranking pipeline errors. Matches the query as
//! a case-insensitive substring of the name only; category and price filters
//! are intentionally dropped on this path (a documented degradation), and
//! ordering is a fixed popularity sort because no relevance signal exists.

use crate::error::SearchError;
use crate::results::{RankedItem, RankedPage};
use bazaar_catalog::{CatalogStore, FindOptions, ItemFilter, SortField, SortKey};
use std::sync::Arc;

/// Substring-match search with fixed popularity ordering.
pub struct FallbackSearch {
    store: Arc<dyn CatalogStore>,
}

impl FallbackSearch {
    /// Create a fallback search over a catalog store.
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Run the fallback for a query and page.
    pub async fn search(&self, q: &str, page: u32, limit: u32) -> Result<RankedPage, SearchError> {
        let filter = ItemFilter::all().with_name_contains(q);
        let skip = (page.max(1) as usize - 1) * limit as usize;
        let options = FindOptions::unbounded()
            .with_sort(vec![
                SortKey::desc(SortField::SalesCount),
                SortKey::desc(SortField::ViewCount),
                SortKey::desc(SortField::CreatedAt),
            ])
            .with_page(skip, limit as usize);

        let items = self.store.find(&filter, &options).await?;
        let total = self.store.count(&filter).await?;

        let items = items
            .into_iter()
            .map(|item| RankedItem { item, score: None })
            .collect();
        Ok(RankedPage { items, total })
    }
}
