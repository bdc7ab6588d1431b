//! Item filter predicate.

use crate::item::CatalogItem;
use serde::{Deserialize, Serialize};

/// A predicate over catalog items.
///
/// All set fields must hold for an item to match (AND semantics). Substring
/// fields are matched case-insensitively. Full-text relevance matching is a
/// store concern and lives on [`crate::store::CatalogStore::text_search`];
/// this type covers the structural filters layered on top of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemFilter {
    /// Case-insensitive substring match against the item name.
    pub name_contains: Option<String>,
    /// Case-insensitive substring match against name, description, category,
    /// or any tag.
    pub any_field_contains: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl ItemFilter {
    /// An empty filter matching every item.
    pub fn all() -> Self {
        Self::default()
    }

    /// Require a case-insensitive substring match on the name.
    pub fn with_name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    /// Require a case-insensitive substring match on any searchable field.
    pub fn with_any_field_contains(mut self, needle: impl Into<String>) -> Self {
        self.any_field_contains = Some(needle.into());
        self
    }

    /// Require an exact category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Require a price range. Either bound may be open.
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Evaluate this filter against an item.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(needle) = &self.name_contains {
            if !contains_fold(&item.name, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.any_field_contains {
            let in_name = contains_fold(&item.name, needle);
            let in_desc = item
                .description
                .as_deref()
                .is_some_and(|d| contains_fold(d, needle));
            let in_category = contains_fold(&item.category, needle);
            let in_tags = item.tags.iter().any(|t| contains_fold(t, needle));
            if !(in_name || in_desc || in_category || in_tags) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &item.category != category {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if item.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if item.price > max {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive substring test.
fn contains_fold(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
