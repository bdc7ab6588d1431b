//! Search request types.

use serde::{Deserialize, Serialize};

/// Sort modes for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// By composite relevance score (default for text search).
    #[default]
    Relevance,
    /// By price.
    Price,
    /// By creation timestamp.
    Newest,
    /// By sales count.
    Sales,
}

impl SortOption {
    /// Parse a sort mode name; `None` for unrecognized values (the engine
    /// then falls back to score-then-recency ordering).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relevance" => Some(SortOption::Relevance),
            "price" => Some(SortOption::Price),
            "newest" => Some(SortOption::Newest),
            "sales" => Some(SortOption::Sales),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse a direction; unrecognized values default to descending.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// A full-search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query text.
    pub q: String,
    /// Page, 1-indexed.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Optional exact category filter.
    pub category: Option<String>,
    /// Optional inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Optional inclusive upper price bound.
    pub max_price: Option<f64>,
    /// Sort mode; `None` means an unrecognized mode was requested.
    pub sort_by: Option<SortOption>,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Suggestion mode: cap results to 8 and drop snippets.
    pub suggest: bool,
}

impl SearchRequest {
    /// Create a request with default paging and relevance sort.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            page: 1,
            limit: 24,
            category: None,
            min_price: None,
            max_price: None,
            sort_by: Some(SortOption::Relevance),
            sort_order: SortOrder::Desc,
            suggest: false,
        }
    }

    /// Set pagination. Page is clamped to at least 1, limit to 1..=100.
    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.clamp(1, 100);
        self
    }

    /// Set a category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set a price range filter.
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Set the sort mode and direction.
    pub fn with_sort(mut self, sort_by: SortOption, sort_order: SortOrder) -> Self {
        self.sort_by = Some(sort_by);
        self.sort_order = sort_order;
        self
    }

    /// Set the sort from raw query-string values, tolerating unknown modes.
    pub fn with_sort_str(mut self, sort_by: &str, sort_order: &str) -> Self {
        self.sort_by = SortOption::parse(sort_by);
        self.sort_order = SortOrder::parse(sort_order);
        self
    }

    /// Enable suggestion mode.
    pub fn with_suggest_mode(mut self) -> Self {
        self.suggest = true;
        self
    }

    /// Documents to skip for the requested page.
    ///
    /// Treats `page == 0` as page 1: wire-decoded requests bypass the
    /// `with_page` clamp, and a zero page must not underflow.
    pub fn skip(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.limit as usize
    }
}
