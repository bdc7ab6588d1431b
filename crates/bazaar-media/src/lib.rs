//! Media host integration for Bazaar.
//!
//! - **URLs**: [`UrlBuilder`] templates deterministic size-variant and
//!   format-alternative URLs from a public ID, and recognizes the host's own
//!   upload URLs so already-hosted images never re-import
//! - **Import**: the [`MediaImporter`] seam for pulling foreign images into
//!   the media host, the only external I/O in the search core
//! - **Normalization**: [`ImageNormalizer`] repairs heterogeneous image
//!   references into canonical records on every read path, swallowing
//!   failures rather than ever breaking a read

pub mod import;
pub mod normalizer;
pub mod url;

pub use import::{FailingImporter, MediaError, MediaImporter, RecordingImporter, RemoteUpload};
pub use normalizer::{ImageNormalizer, NormalizeOutcome, NormalizerConfig};
pub use url::{MediaHostConfig, UrlBuilder};
