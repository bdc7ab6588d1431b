//! Image reference normalization.
//!
//! Every read path funnels catalog items through [`ImageNormalizer`] before
//! returning them. Only the first image is inspected and repaired; later
//! indices pass through untouched. Normalization never fails a read: any
//! import error or timeout is swallowed and the item keeps its original
//! reference, with the outcome reported for telemetry.

use crate::import::{MediaError, MediaImporter};
use crate::url::UrlBuilder;
use bazaar_catalog::{CatalogItem, CatalogStore, ImageMeta, ImageRecord, ImageRef};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Normalizer tuning.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Bound on each remote import; on expiry the original image is kept.
    pub import_timeout: Duration,
    /// Public ID substituted for corrupted and placeholder images.
    pub fallback_public_id: String,
}

impl NormalizerConfig {
    /// Override the import timeout.
    pub fn with_import_timeout(mut self, timeout: Duration) -> Self {
        self.import_timeout = timeout;
        self
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            import_timeout: Duration::from_secs(3),
            fallback_public_id: "sample".to_string(),
        }
    }
}

/// What normalization did to an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// The item has no images.
    NoImages,
    /// The first image was already canonical; nothing changed.
    AlreadyCanonical,
    /// The first image was replaced with a canonical record.
    Repaired,
    /// Repair was skipped or swallowed; the original reference was kept.
    Kept(String),
}

impl NormalizeOutcome {
    /// Whether the item's first image was rewritten.
    pub fn is_repaired(&self) -> bool {
        matches!(self, NormalizeOutcome::Repaired)
    }
}

/// Repairs heterogeneous image references into canonical records.
pub struct ImageNormalizer {
    importer: Arc<dyn MediaImporter>,
    urls: UrlBuilder,
    config: NormalizerConfig,
    store: Option<Arc<dyn CatalogStore>>,
}

impl ImageNormalizer {
    /// Create a normalizer over an importer and URL builder.
    pub fn new(importer: Arc<dyn MediaImporter>, urls: UrlBuilder) -> Self {
        Self {
            importer,
            urls,
            config: NormalizerConfig::default(),
            store: None,
        }
    }

    /// Override the configuration.
    pub fn with_config(mut self, config: NormalizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Persist repairs back to a catalog store (best effort; write failures
    /// are swallowed).
    pub fn with_store(mut self, store: Arc<dyn CatalogStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The fixed record substituted for corrupted and placeholder images.
    fn fallback_record(&self) -> ImageRecord {
        self.urls.build_record(
            &self.config.fallback_public_id,
            ImageMeta::from_dimensions(800, 600),
        )
    }

    /// Import a remote URL within the configured timeout.
    async fn import(&self, url: &str) -> Result<ImageRecord, MediaError> {
        let upload = tokio::time::timeout(self.config.import_timeout, self.importer.upload_remote(url))
            .await
            .map_err(|_| MediaError::Timeout(self.config.import_timeout))??;
        Ok(self.urls.build_record(
            &upload.public_id,
            ImageMeta::from_dimensions(upload.width, upload.height),
        ))
    }

    /// Normalize one item. Never fails; the outcome reports degradations.
    ///
    /// Re-normalizing a normalized item is a no-op (the canonical fast path).
    pub async fn normalize_item(&self, mut item: CatalogItem) -> (CatalogItem, NormalizeOutcome) {
        let Some(first) = item.images.first().cloned() else {
            return (item, NormalizeOutcome::NoImages);
        };

        let repaired = match &first {
            ImageRef::Canonical(_) => return (item, NormalizeOutcome::AlreadyCanonical),
            ImageRef::Corrupted(_) => Ok(self.fallback_record()),
            ImageRef::Legacy(legacy) => {
                if UrlBuilder::is_placeholder(&legacy.full) {
                    Ok(self.fallback_record())
                } else if let Some(public_id) = self.urls.extract_public_id(&legacy.full) {
                    // Already hosted: derive purely, no network call.
                    Ok(self.urls.build_record(&public_id, ImageMeta::default()))
                } else {
                    self.import(&legacy.full).await
                }
            }
            ImageRef::Url(url) => self.import(url).await,
            ImageRef::Unknown(_) => {
                return (item, NormalizeOutcome::Kept("unrecognized image shape".to_string()));
            }
        };

        match repaired {
            Ok(record) => {
                item.images[0] = ImageRef::Canonical(record);
                self.persist(&item).await;
                (item, NormalizeOutcome::Repaired)
            }
            Err(err) => {
                warn!(item = %item.id, error = %err, "image repair swallowed, keeping original reference");
                (item, NormalizeOutcome::Kept(err.to_string()))
            }
        }
    }

    /// Best-effort write-back of a repaired image list.
    async fn persist(&self, item: &CatalogItem) {
        let Some(store) = &self.store else { return };
        if let Err(err) = store.update_images(&item.id, item.images.clone()).await {
            warn!(item = %item.id, error = %err, "image repair write-back failed");
        }
    }

    /// Normalize a page of items concurrently.
    ///
    /// End-to-end latency is bounded by the slowest single item rather than
    /// the sum of imports.
    pub async fn normalize_page(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        let normalized = join_all(items.into_iter().map(|item| self.normalize_item(item))).await;
        let repaired = normalized.iter().filter(|(_, o)| o.is_repaired()).count();
        if repaired > 0 {
            debug!(repaired, "normalized result page");
        }
        normalized.into_iter().map(|(item, _)| item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{FailingImporter, RecordingImporter, RemoteUpload};
    use async_trait::async_trait;
    use bazaar_catalog::{CorruptedImage, MemoryStore};

    fn normalizer(importer: Arc<dyn MediaImporter>) -> ImageNormalizer {
        ImageNormalizer::new(importer, UrlBuilder::default())
    }

    fn item_with(images: Vec<ImageRef>) -> CatalogItem {
        CatalogItem::new("i1", "Mug", "kitchen", 9.0).with_images(images)
    }

    #[tokio::test]
    async fn test_no_images() {
        let n = normalizer(Arc::new(RecordingImporter::new()));
        let (item, outcome) = n.normalize_item(item_with(vec![])).await;
        assert_eq!(outcome, NormalizeOutcome::NoImages);
        assert!(item.images.is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_gets_fallback_record() {
        let n = normalizer(Arc::new(RecordingImporter::new()));
        let corrupted = ImageRef::Corrupted(CorruptedImage { id: "x".into() });
        let (item, outcome) = n.normalize_item(item_with(vec![corrupted])).await;

        assert_eq!(outcome, NormalizeOutcome::Repaired);
        match &item.images[0] {
            ImageRef::Canonical(rec) => {
                assert_eq!(rec.public_id, "sample");
                assert!((rec.metadata.aspect_ratio.unwrap() - 1.333).abs() < 0.001);
            }
            other => panic!("expected canonical, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_placeholder_legacy_gets_fallback() {
        let n = normalizer(Arc::new(RecordingImporter::new()));
        let legacy = ImageRef::legacy("https://via.placeholder.com/300", None);
        let (item, outcome) = n.normalize_item(item_with(vec![legacy])).await;

        assert_eq!(outcome, NormalizeOutcome::Repaired);
        match &item.images[0] {
            ImageRef::Canonical(rec) => assert_eq!(rec.public_id, "sample"),
            other => panic!("expected canonical, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hosted_legacy_derives_without_network() {
        let importer = Arc::new(RecordingImporter::new());
        let n = normalizer(importer.clone());
        let legacy = ImageRef::legacy(
            "https://res.cloudinary.com/acct/image/upload/v123/products/abc123.jpg",
            None,
        );
        let (item, outcome) = n.normalize_item(item_with(vec![legacy])).await;

        assert_eq!(outcome, NormalizeOutcome::Repaired);
        assert_eq!(importer.call_count(), 0, "hosted URLs must not import");
        match &item.images[0] {
            ImageRef::Canonical(rec) => assert_eq!(rec.public_id, "products/abc123"),
            other => panic!("expected canonical, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_foreign_url_imports() {
        let importer = Arc::new(RecordingImporter::new());
        let n = normalizer(importer.clone());
        let (item, outcome) = n
            .normalize_item(item_with(vec![ImageRef::url("https://cdn.shop.net/mug.jpg")]))
            .await;

        assert_eq!(outcome, NormalizeOutcome::Repaired);
        assert_eq!(importer.call_count(), 1);
        match &item.images[0] {
            ImageRef::Canonical(rec) => {
                assert_eq!(rec.public_id, "imported/mug");
                assert_eq!(rec.metadata.width, Some(640));
            }
            other => panic!("expected canonical, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_import_failure_keeps_original() {
        let n = normalizer(Arc::new(FailingImporter));
        let original = ImageRef::url("https://cdn.shop.net/mug.jpg");
        let (item, outcome) = n.normalize_item(item_with(vec![original.clone()])).await;

        assert!(matches!(outcome, NormalizeOutcome::Kept(_)));
        assert_eq!(item.images[0], original);
    }

    struct StalledImporter;

    #[async_trait]
    impl MediaImporter for StalledImporter {
        async fn upload_remote(&self, _url: &str) -> Result<RemoteUpload, MediaError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            unreachable!("import should have timed out");
        }
    }

    #[tokio::test]
    async fn test_import_timeout_keeps_original() {
        let n = normalizer(Arc::new(StalledImporter)).with_config(
            NormalizerConfig::default().with_import_timeout(Duration::from_millis(10)),
        );
        let original = ImageRef::url("https://cdn.shop.net/mug.jpg");
        let (item, outcome) = n.normalize_item(item_with(vec![original.clone()])).await;

        assert!(matches!(outcome, NormalizeOutcome::Kept(_)));
        assert_eq!(item.images[0], original);
    }

    #[tokio::test]
    async fn test_idempotence() {
        let n = normalizer(Arc::new(RecordingImporter::new()));
        let (once, _) = n
            .normalize_item(item_with(vec![ImageRef::url("https://cdn.shop.net/mug.jpg")]))
            .await;
        let (twice, outcome) = n.normalize_item(once.clone()).await;

        assert_eq!(outcome, NormalizeOutcome::AlreadyCanonical);
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_only_first_image_repaired() {
        let n = normalizer(Arc::new(RecordingImporter::new()));
        let second = ImageRef::url("https://cdn.shop.net/second.jpg");
        let (item, _) = n
            .normalize_item(item_with(vec![
                ImageRef::url("https://cdn.shop.net/first.jpg"),
                second.clone(),
            ]))
            .await;

        assert!(item.images[0].is_canonical());
        assert_eq!(item.images[1], second);
    }

    #[tokio::test]
    async fn test_canonical_shape_fully_populated() {
        let n = normalizer(Arc::new(RecordingImporter::new()));
        let (item, _) = n
            .normalize_item(item_with(vec![ImageRef::url("https://cdn.shop.net/mug.jpg")]))
            .await;
        match &item.images[0] {
            ImageRef::Canonical(rec) => {
                for url in [
                    &rec.variants.micro,
                    &rec.variants.thumb,
                    &rec.variants.small,
                    &rec.variants.medium,
                    &rec.variants.large,
                    &rec.variants.original,
                    &rec.formats.avif,
                    &rec.formats.webp,
                    &rec.formats.jpg,
                ] {
                    assert!(url.contains("imported/mug"));
                }
            }
            other => panic!("expected canonical, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repair_write_back() {
        let store = Arc::new(MemoryStore::new());
        let item = item_with(vec![ImageRef::url("https://cdn.shop.net/mug.jpg")]);
        store.insert(item.clone());

        let n = normalizer(Arc::new(RecordingImporter::new())).with_store(store.clone());
        let (_, outcome) = n.normalize_item(item).await;

        assert_eq!(outcome, NormalizeOutcome::Repaired);
        assert_eq!(store.update_calls(), 1);
        let persisted = store.get(&"i1".into()).unwrap();
        assert!(persisted.images[0].is_canonical());
    }

    #[tokio::test]
    async fn test_normalize_page_repairs_each_item() {
        let n = normalizer(Arc::new(RecordingImporter::new()));
        let items = vec![
            item_with(vec![ImageRef::url("https://cdn.shop.net/a.jpg")]),
            CatalogItem::new("i2", "Bowl", "kitchen", 4.0)
                .with_images(vec![ImageRef::url("https://cdn.shop.net/b.jpg")]),
        ];
        let out = n.normalize_page(items).await;
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|i| i.images[0].is_canonical()));
    }
}
