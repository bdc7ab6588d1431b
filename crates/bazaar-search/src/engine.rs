//! Primary search ranking pipeline.
//!
//! Filter, score, sort, paginate, in one logically-consistent execution: the
//! full filtered candidate set is scored in memory, so the page slice and
//! the total count always agree. Failures propagate to the facade, which
//! substitutes the regex fallback.

use crate::error::SearchError;
use crate::request::{SearchRequest, SortOption, SortOrder};
use crate::results::{RankedItem, RankedPage};
use crate::text::QueryMatcher;
use crate::weights::RankWeights;
use bazaar_catalog::{CatalogStore, ItemFilter, ScoredItem};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// The relevance-and-popularity ranking engine.
pub struct RankingEngine {
    store: Arc<dyn CatalogStore>,
    weights: RankWeights,
}

impl RankingEngine {
    /// Create an engine over a catalog store with default weights.
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            weights: RankWeights::default(),
        }
    }

    /// Override the scoring weights.
    pub fn with_weights(mut self, weights: RankWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Run the full pipeline for a request.
    pub async fn search(&self, request: &SearchRequest) -> Result<RankedPage, SearchError> {
        let mut filter = ItemFilter::all();
        if let Some(category) = &request.category {
            filter = filter.with_category(category.clone());
        }
        if request.min_price.is_some() || request.max_price.is_some() {
            filter = filter.with_price_range(request.min_price, request.max_price);
        }

        let candidates = self.store.text_search(&request.q, &filter).await?;
        debug!(query = %request.q, candidates = candidates.len(), "ranking candidates");

        let matcher = QueryMatcher::new(&request.q);
        let mut scored: Vec<RankedItem> = candidates
            .into_iter()
            .map(|candidate| {
                let score = self.score(&candidate, &matcher);
                RankedItem {
                    item: candidate.item,
                    score: Some(score),
                }
            })
            .collect();

        scored.sort_by(|a, b| compare(a, b, request.sort_by, request.sort_order));

        let total = scored.len() as u64;
        let items: Vec<RankedItem> = scored
            .into_iter()
            .skip(request.skip())
            .take(request.limit as usize)
            .collect();

        Ok(RankedPage { items, total })
    }

    /// Composite score for one candidate.
    ///
    /// The prefix, word-boundary, and substring bonuses are independent and
    /// stack: a name that is a prefix match also collects the substring
    /// bonus.
    fn score(&self, candidate: &ScoredItem, matcher: &QueryMatcher) -> f64 {
        let w = &self.weights;
        let item = &candidate.item;

        let mut score = candidate.text_score * w.text;
        if matcher.is_prefix(&item.name) {
            score += w.prefix;
        }
        if matcher.is_word_prefix(&item.name) {
            score += w.word_prefix;
        }
        if matcher.is_substring(&item.name) {
            score += w.substring;
        }
        score += item.sales_count as f64 * w.sales + item.view_count as f64 * w.views;
        score
    }
}

/// Ranking comparator.
///
/// Every mode ends with an item-id tiebreak so repeated identical queries
/// paginate identically. An unrecognized sort mode (`sort_by == None`) falls
/// back to score descending, then creation time descending.
fn compare(a: &RankedItem, b: &RankedItem, sort_by: Option<SortOption>, order: SortOrder) -> Ordering {
    let primary = match sort_by {
        Some(SortOption::Relevance) => cmp_f64(a.score.unwrap_or(0.0), b.score.unwrap_or(0.0)),
        Some(SortOption::Price) => cmp_f64(a.item.price, b.item.price),
        Some(SortOption::Newest) => a.item.created_at.cmp(&b.item.created_at),
        Some(SortOption::Sales) => a.item.sales_count.cmp(&b.item.sales_count),
        None => {
            let by_score = cmp_f64(b.score.unwrap_or(0.0), a.score.unwrap_or(0.0));
            let ord = by_score.then_with(|| b.item.created_at.cmp(&a.item.created_at));
            return ord.then_with(|| a.item.id.cmp(&b.item.id));
        }
    };
    let directed = match order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    };
    directed.then_with(|| a.item.id.cmp(&b.item.id))
}

/// Total order on scores; NaN sorts as equal.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_catalog::{CatalogItem, MemoryStore};

    fn engine_with(items: Vec<CatalogItem>) -> RankingEngine {
        RankingEngine::new(Arc::new(MemoryStore::with_items(items)))
    }

    fn chocolate_catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("a", "Premium Dark Chocolate", "confectionery", 6.0)
                .with_counts(5, 100)
                .with_created_at(100),
            CatalogItem::new("b", "Milk Chocolate Bar", "confectionery", 2.5)
                .with_counts(20, 50)
                .with_created_at(200),
            CatalogItem::new("c", "Chocolate", "confectionery", 3.0)
                .with_counts(0, 0)
                .with_created_at(300),
            CatalogItem::new("d", "Green Tea", "beverages", 4.0)
                .with_counts(50, 500)
                .with_created_at(400),
        ]
    }

    #[tokio::test]
    async fn test_exact_prefix_dominates_substring() {
        let engine = engine_with(chocolate_catalog());
        let page = engine.search(&SearchRequest::new("chocolate")).await.unwrap();

        // "Chocolate" (exact prefix, zero popularity) must outrank names
        // that merely contain the query, despite their sales and views.
        assert_eq!(page.items[0].item.id.as_str(), "c");
    }

    #[tokio::test]
    async fn test_word_prefix_and_substring_stack() {
        let engine = engine_with(chocolate_catalog());
        let page = engine.search(&SearchRequest::new("choco")).await.unwrap();

        // Both chocolate items match at a word boundary and as a substring;
        // neither name starts with "choco"... except "Chocolate" itself.
        let a = page.items.iter().find(|r| r.item.id.as_str() == "a").unwrap();
        let b = page.items.iter().find(|r| r.item.id.as_str() == "b").unwrap();

        // text(1*10) + word_prefix(50) + substring(10) + popularity.
        let base = 10.0 + 50.0 + 10.0;
        assert!((a.score.unwrap() - (base + 5.0 * 2.0 + 100.0 * 0.2)).abs() < 1e-9);
        assert!((b.score.unwrap() - (base + 20.0 * 2.0 + 50.0 * 0.2)).abs() < 1e-9);
        // Relative order between the two comes from popularity.
        assert!(b.score.unwrap() > a.score.unwrap());
    }

    #[tokio::test]
    async fn test_category_and_price_filters() {
        let engine = engine_with(chocolate_catalog());
        let req = SearchRequest::new("chocolate")
            .with_category("confectionery")
            .with_price_range(Some(3.0), None);
        let page = engine.search(&req).await.unwrap();

        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|r| r.item.price >= 3.0));
    }

    #[tokio::test]
    async fn test_sort_by_price_asc() {
        let engine = engine_with(chocolate_catalog());
        let req = SearchRequest::new("chocolate").with_sort(SortOption::Price, SortOrder::Asc);
        let page = engine.search(&req).await.unwrap();

        let prices: Vec<f64> = page.items.iter().map(|r| r.item.price).collect();
        assert_eq!(prices, vec![2.5, 3.0, 6.0]);
    }

    #[tokio::test]
    async fn test_sort_by_newest() {
        let engine = engine_with(chocolate_catalog());
        let req = SearchRequest::new("chocolate").with_sort(SortOption::Newest, SortOrder::Desc);
        let page = engine.search(&req).await.unwrap();

        assert_eq!(page.items[0].item.id.as_str(), "c");
    }

    #[tokio::test]
    async fn test_unrecognized_sort_falls_back_to_score_then_recency() {
        let engine = engine_with(chocolate_catalog());
        let req = SearchRequest::new("chocolate").with_sort_str("bestselling", "desc");
        let page = engine.search(&req).await.unwrap();

        assert_eq!(page.items[0].item.id.as_str(), "c");
    }

    #[tokio::test]
    async fn test_pagination_total_is_page_independent() {
        let engine = engine_with(chocolate_catalog());
        let p1 = engine
            .search(&SearchRequest::new("chocolate").with_page(1, 2))
            .await
            .unwrap();
        let p2 = engine
            .search(&SearchRequest::new("chocolate").with_page(2, 2))
            .await
            .unwrap();

        assert_eq!(p1.total, 3);
        assert_eq!(p2.total, 3);
        assert_eq!(p1.items.len(), 2);
        assert_eq!(p2.items.len(), 1);
    }

    #[tokio::test]
    async fn test_relevance_ties_break_by_id() {
        let items = vec![
            CatalogItem::new("z", "Oolong Tea", "beverages", 4.0),
            CatalogItem::new("a", "Orange Tea", "beverages", 4.0),
        ];
        let engine = engine_with(items);
        let page = engine.search(&SearchRequest::new("tea")).await.unwrap();

        // Identical scores; id ascending keeps pagination deterministic.
        assert_eq!(page.items[0].item.id.as_str(), "a");
        assert_eq!(page.items[1].item.id.as_str(), "z");
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = Arc::new(MemoryStore::with_items(chocolate_catalog()));
        store.set_text_search_failing(true);
        let engine = RankingEngine::new(store);

        let err = engine.search(&SearchRequest::new("chocolate")).await;
        assert!(err.is_err());
    }
}
