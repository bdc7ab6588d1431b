//! Catalog store interface.
//!
//! The search core never owns persistent storage; it consumes this seam.
//! Implementations are expected to be cheap to share (`Arc<dyn CatalogStore>`)
//! and safe to call concurrently from independent request tasks.

use crate::filter::ItemFilter;
use crate::ids::ItemId;
use crate::image::ImageRef;
use crate::item::CatalogItem;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by catalog store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A find/count query failed.
    #[error("Query error: {0}")]
    Query(String),

    /// The store cannot serve native text-relevance search.
    #[error("Text search unavailable: {0}")]
    TextSearchUnavailable(String),

    /// A write-back failed.
    #[error("Write error: {0}")]
    Write(String),
}

/// A sortable document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Price,
    CreatedAt,
    SalesCount,
    ViewCount,
    Name,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// One key of a compound sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    /// Ascending sort on a field.
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on a field.
    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Options for a find query.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Compound sort, applied in key order.
    pub sort: Vec<SortKey>,
    /// Documents to skip before collecting.
    pub skip: usize,
    /// Maximum documents to return.
    pub limit: Option<usize>,
}

impl FindOptions {
    /// No sort, no skip, no limit.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Set the compound sort.
    pub fn with_sort(mut self, sort: Vec<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    /// Set skip/limit pagination.
    pub fn with_page(mut self, skip: usize, limit: usize) -> Self {
        self.skip = skip;
        self.limit = Some(limit);
        self
    }

    /// Set only a limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// An item paired with the store's native text-relevance score.
#[derive(Debug, Clone)]
pub struct ScoredItem {
    pub item: CatalogItem,
    /// Native relevance score; 0 when the store has no signal.
    pub text_score: f64,
}

/// Read and repair-write access to the catalog collection.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch items matching a filter.
    async fn find(&self, filter: &ItemFilter, options: &FindOptions) -> Result<Vec<CatalogItem>, StoreError>;

    /// Count items matching a filter.
    async fn count(&self, filter: &ItemFilter) -> Result<u64, StoreError>;

    /// Full-text search combined with a structural filter.
    ///
    /// Returns the complete matching set with native relevance scores; the
    /// caller ranks and paginates. May fail with
    /// [`StoreError::TextSearchUnavailable`] on stores without a text index.
    async fn text_search(&self, query: &str, filter: &ItemFilter) -> Result<Vec<ScoredItem>, StoreError>;

    /// Replace an item's image references (normalization write-back).
    async fn update_images(&self, id: &ItemId, images: Vec<ImageRef>) -> Result<(), StoreError>;
}
