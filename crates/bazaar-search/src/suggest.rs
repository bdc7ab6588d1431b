//! Autocomplete suggestion scorer.
//!
//! A bounded, store-independent sibling of the ranking engine: candidates
//! come from a capped substring window across name, description, category,
//! and tags, and scoring is a reduced heuristic with no native text score.
//! The candidate window caps worst-case scoring cost regardless of catalog
//! size.

use crate::error::SearchError;
use crate::results::RankedItem;
use crate::text::QueryMatcher;
use crate::weights::SuggestWeights;
use bazaar_catalog::{CatalogItem, CatalogStore, FindOptions, ItemFilter};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Maximum candidates fetched for one suggestion query.
pub const CANDIDATE_WINDOW: usize = 200;

/// Scores and orders autocomplete candidates.
pub struct SuggestionScorer {
    store: Arc<dyn CatalogStore>,
    weights: SuggestWeights,
    window: usize,
}

impl SuggestionScorer {
    /// Create a scorer over a catalog store with default weights.
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            weights: SuggestWeights::default(),
            window: CANDIDATE_WINDOW,
        }
    }

    /// Override the scoring weights.
    pub fn with_weights(mut self, weights: SuggestWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Score candidates for a query, already trimmed by the caller.
    ///
    /// Returns at most `limit` items, score descending with a name-ascending
    /// tiebreak; zero-score candidates are dropped.
    pub async fn suggest(&self, q: &str, limit: usize) -> Result<Vec<RankedItem>, SearchError> {
        if q.is_empty() {
            return Ok(Vec::new());
        }

        let filter = ItemFilter::all().with_any_field_contains(q);
        let candidates = self
            .store
            .find(&filter, &FindOptions::unbounded().with_limit(self.window))
            .await?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        debug!(query = %q, candidates = candidates.len(), "scoring suggestion candidates");

        let matcher = QueryMatcher::new(q);
        let mut scored: Vec<RankedItem> = candidates
            .into_iter()
            .filter_map(|item| {
                let score = self.score(&item, q, &matcher);
                (score > 0.0).then_some(RankedItem {
                    item,
                    score: Some(score),
                })
            })
            .collect();

        scored.sort_by(compare);
        scored.truncate(limit);
        Ok(scored)
    }

    /// Reduced heuristic score for one candidate.
    fn score(&self, item: &CatalogItem, q: &str, matcher: &QueryMatcher) -> f64 {
        let w = &self.weights;
        let q_folded = q.to_lowercase();

        let mut score = 0.0;
        if matcher.is_prefix(&item.name) {
            score += w.prefix;
        }
        if matcher.is_word_prefix(&item.name) {
            score += w.word_prefix;
        }
        if matcher.is_substring(&item.name) {
            score += w.substring;
        }
        if item.category.to_lowercase().contains(&q_folded) {
            score += w.category;
        }
        // Additive per matching tag, deliberately uncapped.
        let matching_tags = item
            .tags
            .iter()
            .filter(|t| t.to_lowercase().contains(&q_folded))
            .count();
        score += matching_tags as f64 * w.tag;

        score += item.sales_count as f64 * w.sales + item.view_count as f64 * w.views;
        score
    }
}

/// Score descending, then name ascending. The name tiebreak is part of the
/// contract: equal-scored candidates must order identically on every run.
fn compare(a: &RankedItem, b: &RankedItem) -> Ordering {
    b.score
        .unwrap_or(0.0)
        .partial_cmp(&a.score.unwrap_or(0.0))
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.item.name.cmp(&b.item.name))
}
