//! Multi-tier product search, ranking, and suggestions for Bazaar.
//!
//! The entry point is [`SearchFacade`], which layers three retrieval tiers
//! over a [`bazaar_catalog::CatalogStore`]:
//!
//! - **Ranking engine**: the primary relevance-and-popularity pipeline
//! - **Regex fallback**: degraded substring search, substituted transparently
//!   when the primary pipeline fails
//! - **Suggestion scorer**: bounded-cost autocomplete with deterministic
//!   ordering
//!
//! Every returned item passes through the
//! [`bazaar_media::ImageNormalizer`] first, so clients always see canonical
//! image records when one can be derived. No facade surface returns an
//! error; the only failure mode is degraded result quality, observable via
//! [`SearchOutcome`].

pub mod engine;
pub mod error;
pub mod facade;
pub mod fallback;
pub mod request;
pub mod results;
pub mod suggest;
pub mod text;
pub mod weights;

pub use engine::RankingEngine;
pub use error::SearchError;
pub use facade::SearchFacade;
pub use fallback::FallbackSearch;
pub use request::{SearchRequest, SortOption, SortOrder};
pub use results::{RankedItem, RankedPage, RankedProduct, SearchOutcome, SearchResponse, Suggestion};
pub use suggest::{SuggestionScorer, CANDIDATE_WINDOW};
pub use weights::{RankWeights, SuggestWeights};
