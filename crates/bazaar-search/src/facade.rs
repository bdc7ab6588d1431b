//! Search facade: the single entry point over the ranking tiers.
//!
//! Normalizes the raw query, short-circuits empty input, delegates to the
//! ranking engine with transparent fallback substitution, and always passes
//! returned items through the image normalizer before projection. Nothing on
//! this surface returns an error to the caller; the only failure mode is
//! degraded result quality, reported through [`SearchOutcome`].

use crate::engine::RankingEngine;
use crate::fallback::FallbackSearch;
use crate::request::SearchRequest;
use crate::results::{RankedProduct, SearchOutcome, SearchResponse, Suggestion};
use crate::suggest::SuggestionScorer;
use crate::text::{snippet_centered, snippet_prefix};
use crate::weights::{RankWeights, SuggestWeights};
use bazaar_catalog::CatalogStore;
use bazaar_media::ImageNormalizer;
use std::sync::Arc;
use tracing::warn;

/// Result cap applied in suggestion mode.
const SUGGEST_MODE_CAP: u32 = 8;

/// Default number of suggestions returned.
const DEFAULT_SUGGESTION_LIMIT: usize = 12;

/// Snippet radius around the first query occurrence, in chars.
const SNIPPET_RADIUS: usize = 30;

/// Suggestion snippet cap, in chars.
const SUGGESTION_SNIPPET_MAX: usize = 120;

/// Entry point for product search and autocomplete.
pub struct SearchFacade {
    store: Arc<dyn CatalogStore>,
    engine: RankingEngine,
    fallback: FallbackSearch,
    suggester: SuggestionScorer,
    normalizer: Arc<ImageNormalizer>,
}

impl SearchFacade {
    /// Create a facade over a catalog store and an image normalizer.
    pub fn new(store: Arc<dyn CatalogStore>, normalizer: Arc<ImageNormalizer>) -> Self {
        Self {
            engine: RankingEngine::new(store.clone()),
            fallback: FallbackSearch::new(store.clone()),
            suggester: SuggestionScorer::new(store.clone()),
            store,
            normalizer,
        }
    }

    /// Override the ranking weights.
    pub fn with_rank_weights(mut self, weights: RankWeights) -> Self {
        self.engine = RankingEngine::new(self.store.clone()).with_weights(weights);
        self
    }

    /// Override the suggestion weights.
    pub fn with_suggest_weights(mut self, weights: SuggestWeights) -> Self {
        self.suggester = SuggestionScorer::new(self.store.clone()).with_weights(weights);
        self
    }

    /// Full search. Never errors; engine failures degrade to the fallback.
    pub async fn search(&self, request: SearchRequest) -> SearchResponse {
        let mut request = request;
        request.q = request.q.trim().to_string();
        if request.q.is_empty() {
            return SearchResponse::empty(request.q, "Empty search query.", SearchOutcome::EmptyQuery);
        }
        if request.suggest {
            request.limit = request.limit.min(SUGGEST_MODE_CAP);
        }

        let (page, outcome) = match self.engine.search(&request).await {
            Ok(page) => (page, SearchOutcome::Primary),
            Err(err) => {
                warn!(query = %request.q, error = %err, "primary search failed, using regex fallback");
                match self.fallback.search(&request.q, request.page, request.limit).await {
                    Ok(page) => (page, SearchOutcome::Fallback),
                    Err(err) => {
                        warn!(query = %request.q, error = %err, "fallback search failed");
                        return SearchResponse::empty(
                            request.q,
                            "Search is temporarily unavailable.",
                            SearchOutcome::Unavailable,
                        );
                    }
                }
            }
        };

        let scores: Vec<Option<f64>> = page.items.iter().map(|r| r.score).collect();
        let items: Vec<_> = page.items.into_iter().map(|r| r.item).collect();
        let items = self.normalizer.normalize_page(items).await;

        let products = items
            .into_iter()
            .zip(scores)
            .map(|(item, score)| {
                let snippet = if request.suggest {
                    None
                } else {
                    item.description
                        .as_deref()
                        .map(|d| snippet_centered(d, &request.q, SNIPPET_RADIUS))
                };
                RankedProduct {
                    id: item.id,
                    name: item.name,
                    price: item.price,
                    category: item.category,
                    images: item.images,
                    snippet,
                    score,
                }
            })
            .collect();

        SearchResponse {
            products,
            total: page.total,
            message: None,
            query: request.q,
            outcome,
        }
    }

    /// Autocomplete suggestions. Never errors: internal failures log and
    /// return an empty list so autocomplete cannot break page rendering.
    pub async fn suggest(&self, q: &str, limit: Option<usize>) -> Vec<Suggestion> {
        let q = q.trim();
        if q.is_empty() {
            return Vec::new();
        }
        let limit = limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);

        let ranked = match self.suggester.suggest(q, limit).await {
            Ok(ranked) => ranked,
            Err(err) => {
                warn!(query = %q, error = %err, "suggestion scoring failed, returning empty list");
                return Vec::new();
            }
        };

        // Normalization runs on the surviving slice only, never the full
        // candidate window: imports are too expensive for discarded rows.
        let scores: Vec<f64> = ranked.iter().map(|r| r.score.unwrap_or(0.0)).collect();
        let items: Vec<_> = ranked.into_iter().map(|r| r.item).collect();
        let items = self.normalizer.normalize_page(items).await;

        items
            .into_iter()
            .zip(scores)
            .map(|(item, score)| Suggestion {
                id: item.id,
                name: item.name,
                category: item.category,
                images: item.images,
                snippet: item
                    .description
                    .as_deref()
                    .map(|d| snippet_prefix(d, SUGGESTION_SNIPPET_MAX)),
                score,
            })
            .collect()
    }
}
