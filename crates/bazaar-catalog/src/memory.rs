//! In-memory catalog store.
//!
//! A reference [`CatalogStore`] used by tests and demos. Text search is a
//! naive token-prefix scorer standing in for a store-native text index; the
//! `fail_text_search` switch simulates a store without one, which is what
//! drives the engine's fallback path. Call counters exist so tests can assert
//! that short-circuit paths touch the store zero times.

use crate::filter::ItemFilter;
use crate::ids::ItemId;
use crate::image::ImageRef;
use crate::item::CatalogItem;
use crate::store::{
    CatalogStore, FindOptions, ScoredItem, SortDirection, SortField, SortKey, StoreError,
};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory catalog collection.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Vec<CatalogItem>>,
    fail_text_search: AtomicBool,
    find_calls: AtomicUsize,
    count_calls: AtomicUsize,
    text_search_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with items.
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        let store = Self::new();
        *store.write_items() = items;
        store
    }

    /// Insert one item.
    pub fn insert(&self, item: CatalogItem) {
        self.write_items().push(item);
    }

    /// Read the collection, recovering from lock poisoning: a panicked
    /// test thread must not wedge the shared store.
    fn read_items(&self) -> RwLockReadGuard<'_, Vec<CatalogItem>> {
        self.items.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Write the collection, with the same poison recovery as reads.
    fn write_items(&self) -> RwLockWriteGuard<'_, Vec<CatalogItem>> {
        self.items.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Make subsequent `text_search` calls fail, simulating a store without
    /// a text index.
    pub fn set_text_search_failing(&self, failing: bool) {
        self.fail_text_search.store(failing, AtomicOrdering::SeqCst);
    }

    /// Total store calls of any kind since construction.
    pub fn total_calls(&self) -> usize {
        self.find_calls.load(AtomicOrdering::SeqCst)
            + self.count_calls.load(AtomicOrdering::SeqCst)
            + self.text_search_calls.load(AtomicOrdering::SeqCst)
            + self.update_calls.load(AtomicOrdering::SeqCst)
    }

    /// Number of `update_images` calls.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(AtomicOrdering::SeqCst)
    }

    /// Fetch a snapshot of an item by id.
    pub fn get(&self, id: &ItemId) -> Option<CatalogItem> {
        self.read_items().iter().find(|i| &i.id == id).cloned()
    }
}

/// Lowercased alphanumeric tokens of a string.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Token-prefix relevance score of an item for a query, 0.0 when no query
/// token matches.
fn relevance(item: &CatalogItem, query_tokens: &[String]) -> f64 {
    let mut doc_tokens = tokenize(&item.name);
    if let Some(desc) = &item.description {
        doc_tokens.extend(tokenize(desc));
    }
    doc_tokens.extend(tokenize(&item.category));
    for tag in &item.tags {
        doc_tokens.extend(tokenize(tag));
    }

    query_tokens
        .iter()
        .filter(|q| doc_tokens.iter().any(|d| d.starts_with(q.as_str())))
        .count() as f64
}

/// Compare two items under a compound sort.
fn compare(a: &CatalogItem, b: &CatalogItem, sort: &[SortKey]) -> Ordering {
    for key in sort {
        let ord = match key.field {
            SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::SalesCount => a.sales_count.cmp(&b.sales_count),
            SortField::ViewCount => a.view_count.cmp(&b.view_count),
            SortField::Name => a.name.cmp(&b.name),
        };
        let ord = match key.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find(&self, filter: &ItemFilter, options: &FindOptions) -> Result<Vec<CatalogItem>, StoreError> {
        self.find_calls.fetch_add(1, AtomicOrdering::SeqCst);

        let mut matched: Vec<CatalogItem> = self
            .read_items()
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();

        if !options.sort.is_empty() {
            matched.sort_by(|a, b| compare(a, b, &options.sort));
        }

        let page: Vec<CatalogItem> = matched
            .into_iter()
            .skip(options.skip)
            .take(options.limit.unwrap_or(usize::MAX))
            .collect();
        Ok(page)
    }

    async fn count(&self, filter: &ItemFilter) -> Result<u64, StoreError> {
        self.count_calls.fetch_add(1, AtomicOrdering::SeqCst);

        let n = self.read_items().iter().filter(|i| filter.matches(i)).count();
        Ok(n as u64)
    }

    async fn text_search(&self, query: &str, filter: &ItemFilter) -> Result<Vec<ScoredItem>, StoreError> {
        self.text_search_calls.fetch_add(1, AtomicOrdering::SeqCst);

        if self.fail_text_search.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::TextSearchUnavailable(
                "no text index on catalog collection".to_string(),
            ));
        }

        let query_tokens = tokenize(query);
        let scored = self
            .read_items()
            .iter()
            .filter(|i| filter.matches(i))
            .filter_map(|i| {
                let text_score = relevance(i, &query_tokens);
                (text_score > 0.0).then(|| ScoredItem {
                    item: i.clone(),
                    text_score,
                })
            })
            .collect();
        Ok(scored)
    }

    async fn update_images(&self, id: &ItemId, images: Vec<ImageRef>) -> Result<(), StoreError> {
        self.update_calls.fetch_add(1, AtomicOrdering::SeqCst);

        let mut items = self.write_items();
        match items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.images = images;
                Ok(())
            }
            None => Err(StoreError::Write(format!("no item with id {}", id))),
        }
    }
}
