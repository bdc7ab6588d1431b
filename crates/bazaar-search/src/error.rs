//! Search error types.

use bazaar_catalog::StoreError;
use thiserror::Error;

/// Errors escaping a search pipeline.
///
/// These never reach the client: the facade substitutes the fallback engine
/// or an empty result instead.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The catalog store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
