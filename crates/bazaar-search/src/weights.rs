//! Scoring weight configuration.
//!
//! All point values live here rather than inline in the scorers, so tests
//! can exercise boundary and tie conditions by overriding individual
//! weights.

use serde::{Deserialize, Serialize};

/// Weights for the primary ranking pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankWeights {
    /// Multiplier on the store's native text-relevance score.
    pub text: f64,
    /// Bonus when the name starts with the query.
    pub prefix: f64,
    /// Bonus when the query occurs at a word boundary in the name.
    pub word_prefix: f64,
    /// Bonus when the query occurs anywhere in the name.
    pub substring: f64,
    /// Per-sale popularity contribution.
    pub sales: f64,
    /// Per-view popularity contribution.
    pub views: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            text: 10.0,
            prefix: 100.0,
            word_prefix: 50.0,
            substring: 10.0,
            sales: 2.0,
            views: 0.2,
        }
    }
}

impl RankWeights {
    /// Override the prefix bonus.
    pub fn with_prefix(mut self, prefix: f64) -> Self {
        self.prefix = prefix;
        self
    }

    /// Override the popularity contributions.
    pub fn with_popularity(mut self, sales: f64, views: f64) -> Self {
        self.sales = sales;
        self.views = views;
        self
    }
}

/// Weights for the suggestion scorer's reduced heuristic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SuggestWeights {
    /// Bonus when the name starts with the query.
    pub prefix: f64,
    /// Bonus when the query occurs at a word boundary in the name.
    pub word_prefix: f64,
    /// Bonus when the query occurs anywhere in the name.
    pub substring: f64,
    /// Bonus when the category contains the query.
    pub category: f64,
    /// Bonus per tag containing the query (additive, uncapped).
    pub tag: f64,
    /// Per-sale popularity contribution.
    pub sales: f64,
    /// Per-view popularity contribution.
    pub views: f64,
}

impl Default for SuggestWeights {
    fn default() -> Self {
        Self {
            prefix: 200.0,
            word_prefix: 120.0,
            substring: 60.0,
            category: 40.0,
            tag: 30.0,
            sales: 3.0,
            views: 0.2,
        }
    }
}

impl SuggestWeights {
    /// Override the per-tag bonus.
    pub fn with_tag(mut self, tag: f64) -> Self {
        self.tag = tag;
        self
    }

    /// Override the popularity contributions.
    pub fn with_popularity(mut self, sales: f64, views: f64) -> Self {
        self.sales = sales;
        self.views = views;
        self
    }
}
