//! Search result DTOs.

use bazaar_catalog::{CatalogItem, ImageRef, ItemId};
use serde::{Deserialize, Serialize};

/// A scored item inside the pipeline, before projection.
#[derive(Debug, Clone)]
pub struct RankedItem {
    pub item: CatalogItem,
    /// Composite relevance score; `None` on the fallback path, which has no
    /// relevance signal.
    pub score: Option<f64>,
}

/// One page of ranked items plus the total match count over the full
/// filtered set.
#[derive(Debug, Clone, Default)]
pub struct RankedPage {
    pub items: Vec<RankedItem>,
    pub total: u64,
}

/// A ranked product as serialized to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedProduct {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub category: String,
    /// Normalized image references.
    pub images: Vec<ImageRef>,
    /// Description excerpt; omitted in suggestion mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Composite score; omitted on the fallback path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// An autocomplete suggestion as serialized to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub name: String,
    pub category: String,
    /// Normalized image references.
    pub images: Vec<ImageRef>,
    /// Description prefix, capped at 120 chars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    pub score: f64,
}

/// Which path produced a response. Not serialized; exposed so callers can
/// record degraded-mode telemetry without the wire contract changing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The primary ranking pipeline answered.
    Primary,
    /// The primary pipeline failed; the regex fallback answered.
    Fallback,
    /// Empty query short-circuit, no store access.
    EmptyQuery,
    /// Both pipelines failed; an empty result was substituted.
    Unavailable,
}

/// Response of a full search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub products: Vec<RankedProduct>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub query: String,
    #[serde(skip)]
    pub outcome: SearchOutcome,
}

impl SearchResponse {
    /// An empty response with an explanatory message.
    pub fn empty(query: impl Into<String>, message: impl Into<String>, outcome: SearchOutcome) -> Self {
        Self {
            products: Vec::new(),
            total: 0,
            message: Some(message.into()),
            query: query.into(),
            outcome,
        }
    }
}
