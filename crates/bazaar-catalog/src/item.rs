//! Catalog item document model.

use crate::ids::ItemId;
use crate::image::ImageRef;
use serde::{Deserialize, Serialize};

/// A product document in the catalog store.
///
/// The search core treats items as read-mostly input: it reads and repairs
/// image references but never validates or mutates business fields. Field
/// names mirror the stored document shape (camelCase, `_id`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Unique item identifier.
    #[serde(rename = "_id")]
    pub id: ItemId,
    /// Item name.
    pub name: String,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category name.
    pub category: String,
    /// Unit price. Non-negative by store invariant.
    pub price: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    /// Shipping weight in grams, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Tags for filtering and suggestion matching.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image references, heterogeneous across document generations.
    #[serde(default)]
    pub images: Vec<ImageRef>,
    /// Lifetime sales count.
    #[serde(default)]
    pub sales_count: i64,
    /// Lifetime view count.
    #[serde(default)]
    pub view_count: i64,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created_at: i64,
}

impl CatalogItem {
    /// Create a minimal item, mostly useful for tests and seeding.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: category.into(),
            price,
            stock: 0,
            weight: None,
            tags: Vec::new(),
            images: Vec::new(),
            sales_count: 0,
            view_count: 0,
            created_at: 0,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the images.
    pub fn with_images(mut self, images: Vec<ImageRef>) -> Self {
        self.images = images;
        self
    }

    /// Set sales and view counts.
    pub fn with_counts(mut self, sales: i64, views: i64) -> Self {
        self.sales_count = sales;
        self.view_count = views;
        self
    }

    /// Set the creation timestamp.
    pub fn with_created_at(mut self, ts: i64) -> Self {
        self.created_at = ts;
        self
    }

    /// Popularity signal used by the ranking pipeline: `sales*2 + views*0.2`.
    pub fn popularity(&self) -> f64 {
        self.sales_count as f64 * 2.0 + self.view_count as f64 * 0.2
    }
}
