//! Catalog document model and store interface for Bazaar.
//!
//! This crate owns the read side of the catalog:
//!
//! - **Items**: the [`CatalogItem`] document model with its heterogeneous
//!   image references decoded into the [`ImageRef`] tagged union
//! - **Filters**: the [`ItemFilter`] structural predicate
//! - **Store**: the [`CatalogStore`] async seam (find/count/text-search and
//!   the normalization write-back), plus [`MemoryStore`], an in-process
//!   reference implementation used by tests and demos

pub mod filter;
pub mod ids;
pub mod image;
pub mod item;
pub mod memory;
pub mod store;

pub use filter::ItemFilter;
pub use ids::ItemId;
pub use image::{CorruptedImage, ImageFormats, ImageMeta, ImageRecord, ImageRef, ImageVariants, LegacyImage};
pub use item::CatalogItem;
pub use memory::MemoryStore;
pub use store::{
    CatalogStore, FindOptions, ScoredItem, SortDirection, SortField, SortKey, StoreError,
};
